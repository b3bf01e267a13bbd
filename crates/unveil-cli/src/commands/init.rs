use std::fs;
use std::path::Path;

use unveil_core::demo;

pub fn run(name: &str) -> Result<(), String> {
    let dir = Path::new(name);

    if dir.exists() {
        return Err(format!("directory '{name}' already exists"));
    }

    fs::create_dir_all(dir).map_err(|e| format!("cannot create directory: {e}"))?;

    // Seed the project with the built-in demo so it plays out of the box.
    let script = demo::variant("one").map_err(|e| e.to_string())?;
    let json = script.to_json_pretty().map_err(|e| e.to_string())?;
    fs::write(dir.join("script.json"), json)
        .map_err(|e| format!("cannot write script.json: {e}"))?;

    println!("Created reveal project '{name}' in {name}/");
    println!("  script.json  — stages, gates, and media for a demo story");
    println!();
    println!("Get started:");
    println!("  cd {name}");
    println!("  # Edit script.json: texts, gate secrets, media paths");
    println!("  unveil check script.json    # Validate the script");
    println!("  unveil list script.json     # Show the stage sequence");
    println!("  unveil play script.json     # Play it in the terminal");
    println!("  unveil run script.json      # Headless playthrough with a log");

    Ok(())
}
