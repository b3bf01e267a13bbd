use std::path::Path;

use unveil_core::demo;

pub fn run(variant: &str, output: Option<&Path>) -> Result<(), String> {
    let script = demo::variant(variant).map_err(|e| e.to_string())?;
    let content = script.to_json_pretty().map_err(|e| e.to_string())?;

    if let Some(path) = output {
        std::fs::write(path, &content)
            .map_err(|e| format!("cannot write to {}: {e}", path.display()))?;
        println!("  Exported '{}' to {}", script.meta.title, path.display());
    } else {
        println!("{content}");
    }

    Ok(())
}
