//! CLI frontend for the Unveil reveal-page engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "unveil",
    about = "Unveil — a sequential reveal engine for farewell pages",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a script interactively in the terminal
    Play {
        /// Script file to play (default: a built-in demo)
        script: Option<PathBuf>,

        /// Built-in demo variant (one, two)
        #[arg(long, default_value = "one")]
        variant: String,

        /// Delay between typed characters, in milliseconds
        #[arg(long)]
        speed: Option<u64>,

        /// Tone animation down: instant scrolls, near-instant text
        #[arg(long)]
        reduced_motion: bool,

        /// Never start videos without a keypress
        #[arg(long)]
        no_autoplay: bool,

        /// Keep the background music off until toggled by hand
        #[arg(long)]
        muted: bool,
    },

    /// Validate a script and report every issue
    Check {
        /// Script file to check (default: a built-in demo)
        script: Option<PathBuf>,

        /// Built-in demo variant (one, two)
        #[arg(long, default_value = "one")]
        variant: String,
    },

    /// List the stages of a script in story order
    List {
        /// Script file to list (default: a built-in demo)
        script: Option<PathBuf>,

        /// Built-in demo variant (one, two)
        #[arg(long, default_value = "one")]
        variant: String,
    },

    /// Write a built-in demo script as pretty JSON
    Export {
        /// Built-in demo variant (one, two)
        #[arg(long, default_value = "one")]
        variant: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Play a script headlessly on a fixed-step clock and print the log
    Run {
        /// Script file to run (default: a built-in demo)
        script: Option<PathBuf>,

        /// Built-in demo variant (one, two)
        #[arg(long, default_value = "one")]
        variant: String,

        /// Story-clock step per iteration, in milliseconds
        #[arg(long, default_value = "10")]
        step_ms: u64,

        /// Give up if the story has not finished by this story-clock time
        #[arg(long, default_value = "900000")]
        max_ms: u64,

        /// Show every event and the full configuration
        #[arg(short, long)]
        verbose: bool,

        /// Write a transcript of the run (.md or .json)
        #[arg(long)]
        transcript: Option<PathBuf>,
    },

    /// Create a new script directory with a starter script.json
    Init {
        /// Name of the directory to create
        name: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            script,
            variant,
            speed,
            reduced_motion,
            no_autoplay,
            muted,
        } => commands::play::run(
            script.as_deref(),
            &variant,
            speed,
            reduced_motion,
            no_autoplay,
            muted,
        ),
        Commands::Check { script, variant } => commands::check::run(script.as_deref(), &variant),
        Commands::List { script, variant } => commands::list::run(script.as_deref(), &variant),
        Commands::Export { variant, output } => {
            commands::export::run(&variant, output.as_deref())
        }
        Commands::Run {
            script,
            variant,
            step_ms,
            max_ms,
            verbose,
            transcript,
        } => commands::run::run(
            script.as_deref(),
            &variant,
            step_ms,
            max_ms,
            verbose,
            transcript.as_deref(),
        ),
        Commands::Init { name } => commands::init::run(&name),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
