use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use unveil_core::media::MediaKind;
use unveil_engine::{
    EngineConfig, MediaPhase, Orchestrator, Preload, StoryEvent, StoryEventKind, Transcript,
};

pub fn run(
    script: Option<&Path>,
    variant: &str,
    step_ms: u64,
    max_ms: u64,
    verbose: bool,
    transcript: Option<&Path>,
) -> Result<(), String> {
    if step_ms == 0 {
        return Err("--step-ms must be at least 1".into());
    }

    let script = super::load_script(script, variant)?;
    super::validate_script(&script)?;

    // Unlimited log: the report below wants the whole run.
    let config = EngineConfig::default().with_autoplay(true).with_max_events(0);
    let mut engine = Orchestrator::new(script, config);
    engine.start();

    while !engine.is_finished() && engine.now_ms() < max_ms {
        engine.advance(step_ms);
        drive(&mut engine);
    }

    let title = engine.script().meta.title.clone();
    println!(
        "  {} '{title}' {}",
        "Playthrough".bold(),
        format!("(step {step_ms}ms)").dimmed()
    );
    if verbose {
        print_config(engine.config());
    }
    println!(
        "  {} stages, {} events logged",
        engine.script().stage_count(),
        engine.events().len()
    );
    println!();

    print_events(&engine, verbose);
    print_media_table(&engine);

    if let Some(path) = transcript {
        write_transcript(&engine, &title, path)?;
    }

    if engine.is_finished() {
        let at = engine.now_ms();
        println!(
            "  Reached the end at {}.",
            format!("t+{}.{:03}s", at / 1000, at % 1000).green().bold()
        );
        Ok(())
    } else {
        Err(format!(
            "story did not finish within {max_ms}ms of story time"
        ))
    }
}

/// Stand in for the audience: answer gates, press buttons.
///
/// Gates are only answered once their stage's text is fully revealed,
/// the way a reader would meet them. Videos start on their own because
/// the run config allows autoplay.
fn drive(engine: &mut Orchestrator) {
    let surface_done = engine
        .active_stage()
        .and_then(|stage| engine.surface(&stage.surface))
        .is_some_and(|surface| surface.is_complete());
    if !surface_done {
        return;
    }

    let answer = engine
        .active_gate()
        .filter(|gate| !gate.is_unlocked())
        .and_then(|gate| gate.spec().accepted.first().cloned());
    if let Some(answer) = answer {
        engine.submit_gate(&answer);
        return;
    }

    if engine.armed_button().is_some() {
        engine.press_button();
    }
}

fn print_config(config: &EngineConfig) {
    let preload = match config.preload {
        Preload::Metadata => "metadata",
        Preload::None => "none",
    };
    println!(
        "  {}",
        format!(
            "speed={}ms, reduced_motion={}, autoplay={}, preload={preload}",
            config.speed_ms, config.reduced_motion, config.autoplay
        )
        .dimmed()
    );
}

fn print_events(engine: &Orchestrator, verbose: bool) {
    println!("  {}", "Event Log".bold().underline());
    println!();

    let mut shown = 0_usize;
    for event in engine.events().events() {
        if !verbose && !is_milestone(&event.kind) {
            continue;
        }
        let label = fmt_at(event.at_ms).dimmed();
        println!("  {label} {}", colorize_event(event));
        shown += 1;
    }
    if shown == 0 {
        println!("  {}", "(no events)".dimmed());
    }
    println!();
}

/// The events worth showing without `--verbose`: the story skeleton.
fn is_milestone(kind: &StoryEventKind) -> bool {
    matches!(
        kind,
        StoryEventKind::StageActivated { .. }
            | StoryEventKind::GateAccepted { .. }
            | StoryEventKind::GateRejected { .. }
            | StoryEventKind::ButtonPressed { .. }
            | StoryEventKind::MediaRevealed { .. }
            | StoryEventKind::MediaFinished { .. }
            | StoryEventKind::StoryFinished
    )
}

fn colorize_event(event: &StoryEvent) -> colored::ColoredString {
    match &event.kind {
        StoryEventKind::StageActivated { .. } => event.description.cyan(),
        StoryEventKind::GateAccepted { .. } => event.description.green(),
        StoryEventKind::GateRejected { .. } => event.description.red(),
        StoryEventKind::HintRevealed { .. } => event.description.yellow(),
        StoryEventKind::MediaRevealed { .. }
        | StoryEventKind::MediaStarted { .. }
        | StoryEventKind::MediaPaused { .. }
        | StoryEventKind::MediaFinished { .. } => event.description.blue(),
        StoryEventKind::AutoplayBlocked { .. } => event.description.yellow(),
        StoryEventKind::AmbientStarted
        | StoryEventKind::AmbientStopped
        | StoryEventKind::AmbientDucked
        | StoryEventKind::AmbientResumed
        | StoryEventKind::AmbientTrackChanged { .. } => event.description.magenta(),
        StoryEventKind::StoryFinished => event.description.green().bold(),
        _ => event.description.normal(),
    }
}

fn print_media_table(engine: &Orchestrator) {
    let script = engine.script();
    if script.media.is_empty() {
        return;
    }

    println!("  {}", "Media".bold().underline());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Media", "Kind", "State", "Position"]);

    for spec in &script.media {
        let Some(runtime) = engine.media_runtime(&spec.id) else {
            continue;
        };
        let state = match runtime.phase() {
            MediaPhase::Hidden => "hidden",
            MediaPhase::Ready => "ready",
            MediaPhase::Playing => "playing",
            MediaPhase::Paused => "paused",
            MediaPhase::Ended => "ended",
        };
        let position = match spec.kind {
            MediaKind::Photo => "—".to_string(),
            MediaKind::Video => format!(
                "{}ms / {}",
                runtime.position_ms(),
                spec.duration_ms
                    .map(|d| format!("{d}ms"))
                    .unwrap_or_else(|| "?".to_string())
            ),
        };
        table.add_row(vec![
            spec.id.to_string(),
            spec.kind.to_string(),
            state.to_string(),
            position,
        ]);
    }

    println!("{table}");
    println!();
}

fn write_transcript(engine: &Orchestrator, title: &str, path: &Path) -> Result<(), String> {
    let transcript = Transcript::from_events(title, engine.events().events());
    let content = if path.extension().is_some_and(|ext| ext == "json") {
        transcript.to_json().map_err(|e| e.to_string())?
    } else {
        transcript.export_markdown()
    };
    std::fs::write(path, content)
        .map_err(|e| format!("cannot write transcript to {}: {e}", path.display()))?;
    println!("  Transcript written to {}", path.display());
    Ok(())
}

/// Format a story-clock label like `[t+  4.600s]`, fixed width for alignment.
fn fmt_at(ms: u64) -> String {
    format!("[t+{:>3}.{:03}s]", ms / 1_000, ms % 1_000)
}
