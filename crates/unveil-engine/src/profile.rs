/// Environment variable that forces reduced motion on.
pub const REDUCED_MOTION_ENV: &str = "UNVEIL_REDUCED_MOTION";

/// Core count at or below which a machine counts as low-end.
const LOW_END_CORES: usize = 4;

/// What the machine and its operator ask of the presentation.
///
/// The profile changes pacing and polish only. Stage order, gate
/// verdicts, and media lifecycles are identical on every machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceProfile {
    /// The operator asked for animation to be toned down.
    pub reduced_motion: bool,
    /// The machine is modest; prefer relaxed pacing and lazy media.
    pub low_end: bool,
}

impl DeviceProfile {
    /// Probe the environment for the profile: reduced motion comes from
    /// [`REDUCED_MOTION_ENV`], low-end from the available core count.
    pub fn detect() -> Self {
        let reduced_motion = std::env::var(REDUCED_MOTION_ENV)
            .is_ok_and(|value| flag_set(&value));
        let low_end =
            std::thread::available_parallelism().is_ok_and(|n| n.get() <= LOW_END_CORES);
        Self {
            reduced_motion,
            low_end,
        }
    }
}

fn flag_set(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
