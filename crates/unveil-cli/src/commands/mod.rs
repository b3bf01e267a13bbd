pub mod check;
pub mod export;
pub mod init;
pub mod list;
pub mod play;
pub mod run;

use std::path::Path;

use colored::Colorize;

use unveil_core::demo;
use unveil_core::script::{Script, ScriptIssue};

/// Load a script from a file, or fall back to a built-in demo variant.
pub fn load_script(path: Option<&Path>, variant: &str) -> Result<Script, String> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            Script::from_json(&json).map_err(|e| format!("{}: {e}", path.display()))
        }
        None => demo::variant(variant).map_err(|e| e.to_string()),
    }
}

/// Validate a script, print every issue, and fail on errors.
///
/// Warnings are printed but do not block; a playable script with an odd
/// corner is still playable.
pub fn validate_script(script: &Script) -> Result<(), String> {
    let issues = script.validate();
    print_issues(&issues);

    let errors = issues.iter().filter(|i| i.is_error()).count();
    if errors > 0 {
        Err(format!(
            "validation failed with {} error{}",
            errors,
            if errors == 1 { "" } else { "s" }
        ))
    } else {
        Ok(())
    }
}

/// Print validation issues to stderr, color-coded by severity.
pub fn print_issues(issues: &[ScriptIssue]) {
    for issue in issues {
        if issue.is_error() {
            eprintln!("  {} {}", "error:".red().bold(), issue.message);
        } else {
            eprintln!("  {} {}", "warning:".yellow().bold(), issue.message);
        }
    }
}
