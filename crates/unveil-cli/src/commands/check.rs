use std::path::Path;

pub fn run(script: Option<&Path>, variant: &str) -> Result<(), String> {
    let script = super::load_script(script, variant)?;
    super::validate_script(&script)?;

    println!("  All checks passed for '{}'.", script.meta.title);
    println!(
        "  {} stages, {} gates, {} media items, {} tracks",
        script.stage_count(),
        script.gates.len(),
        script.media.len(),
        script.ambient.len()
    );

    Ok(())
}
