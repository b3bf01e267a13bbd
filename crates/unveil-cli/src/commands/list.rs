use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use unveil_core::stage::{Advance, Stage};

pub fn run(script: Option<&Path>, variant: &str) -> Result<(), String> {
    let script = super::load_script(script, variant)?;

    if script.stages.is_empty() {
        println!("  Script '{}' has no stages.", script.meta.title);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Stage", "Text", "Advance", "Gate", "Media"]);

    for (index, stage) in script.stages.iter().enumerate() {
        table.add_row(vec![
            (index + 1).to_string(),
            stage.id.to_string(),
            text_preview(stage),
            fmt_advance(stage),
            stage
                .gate
                .as_ref()
                .map(|g| g.to_string())
                .unwrap_or_else(|| "—".to_string()),
            stage
                .media
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| "—".to_string()),
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  '{}' — {} stages, {} gates, {} media items",
        script.meta.title,
        script.stage_count(),
        script.gates.len(),
        script.media.len()
    );

    Ok(())
}

fn text_preview(stage: &Stage) -> String {
    let flat = stage.text.replace('\n', " ");
    let preview: String = flat.chars().take(40).collect();
    if flat.chars().count() > 40 {
        format!("{preview}...")
    } else if preview.is_empty() {
        "—".to_string()
    } else {
        preview
    }
}

fn fmt_advance(stage: &Stage) -> String {
    match &stage.advance {
        Advance::AfterText { pause_ms } => format!("after text +{pause_ms}ms"),
        Advance::AfterMedia {
            pause_ms,
            ceiling_ms,
        } => match ceiling_ms {
            Some(ceiling) => format!("after media +{pause_ms}ms (cap {}s)", ceiling / 1_000),
            None => format!("after media +{pause_ms}ms"),
        },
        Advance::OnGate { pause_ms } => format!("on gate +{pause_ms}ms"),
        Advance::OnButton { label } => format!("button \"{label}\""),
        Advance::End => "end".to_string(),
    }
}
