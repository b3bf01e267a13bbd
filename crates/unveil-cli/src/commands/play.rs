//! Launch the terminal player.

use std::path::Path;

use unveil_engine::{DeviceProfile, EngineConfig};
use unveil_tui::App;

pub fn run(
    script: Option<&Path>,
    variant: &str,
    speed: Option<u64>,
    reduced_motion: bool,
    no_autoplay: bool,
    muted: bool,
) -> Result<(), String> {
    let script = super::load_script(script, variant)?;
    super::validate_script(&script)?;

    let mut config = EngineConfig::default()
        .with_autoplay(true)
        .with_profile(&DeviceProfile::detect());
    if let Some(speed_ms) = speed {
        config = config.with_speed(speed_ms);
    }
    if reduced_motion {
        config = config.with_reduced_motion(true);
    }
    if no_autoplay {
        config = config.with_autoplay(false);
    }
    if muted {
        config = config.with_ambient_autostart(false);
    }

    unveil_tui::run(App::new(script, config))
}
