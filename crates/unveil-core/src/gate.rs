use std::fmt;

use serde::{Deserialize, Serialize};

/// Default rejection message shown when a submission does not match.
pub const DEFAULT_ERROR_MESSAGE: &str = "Wrong password. Try again!";

/// Identifier of a password gate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GateId(pub String);

impl GateId {
    /// Create a gate identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for GateId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// How a submission is compared against the accepted values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Character-for-character equality after trimming.
    #[default]
    Exact,
    /// Case-insensitive equality after trimming.
    IgnoreCase,
}

/// A password gate: one step of the story that refuses to advance until
/// the reader types an accepted value.
///
/// Gates never lock out: a rejection re-prompts with a fixed message and
/// the reader may retry without limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateSpec {
    /// Unique identifier of this gate.
    pub id: GateId,
    /// Values the gate accepts. At least one is required.
    pub accepted: Vec<String>,
    /// Comparison rule applied to submissions.
    #[serde(default)]
    pub match_mode: MatchMode,
    /// Optional hint the reader can reveal without penalty.
    #[serde(default)]
    pub hint: Option<String>,
    /// Message shown on rejection.
    #[serde(default = "default_error_message")]
    pub error_message: String,
    /// Whether the input echo is masked (with a reveal toggle).
    #[serde(default = "default_masked")]
    pub masked: bool,
}

fn default_error_message() -> String {
    DEFAULT_ERROR_MESSAGE.to_string()
}

fn default_masked() -> bool {
    true
}

impl GateSpec {
    /// Create a masked, exact-match gate with the default error message.
    pub fn new(id: impl Into<GateId>, accepted: Vec<String>) -> Self {
        Self {
            id: id.into(),
            accepted,
            match_mode: MatchMode::Exact,
            hint: None,
            error_message: default_error_message(),
            masked: true,
        }
    }

    /// Convenience constructor for a gate with a single accepted value.
    pub fn with_secret(id: impl Into<GateId>, secret: impl Into<String>) -> Self {
        Self::new(id, vec![secret.into()])
    }

    /// Set the comparison rule.
    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    /// Set the hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Override the rejection message.
    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = message.into();
        self
    }

    /// Disable input masking for this gate.
    pub fn unmasked(mut self) -> Self {
        self.masked = false;
        self
    }

    /// Whether `raw` matches one of the accepted values.
    ///
    /// Surrounding whitespace on the submission is ignored; the accepted
    /// values are compared as authored.
    pub fn accepts(&self, raw: &str) -> bool {
        let input = raw.trim();
        match self.match_mode {
            MatchMode::Exact => self.accepted.iter().any(|a| a == input),
            MatchMode::IgnoreCase => {
                let lowered = input.to_lowercase();
                self.accepted.iter().any(|a| a.to_lowercase() == lowered)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_trims_surrounding_whitespace() {
        let gate = GateSpec::with_secret("g", "I'll not be anxious anymore");
        assert!(gate.accepts("  I'll not be anxious anymore  "));
        assert!(gate.accepts("I'll not be anxious anymore"));
    }

    #[test]
    fn exact_mode_is_case_sensitive() {
        let gate = GateSpec::with_secret("g", "Shoyo Hinata");
        assert!(gate.accepts("Shoyo Hinata"));
        assert!(!gate.accepts("shoyo hinata"));
        assert!(!gate.accepts("SHOYO HINATA"));
    }

    #[test]
    fn ignore_case_mode_accepts_any_casing() {
        let gate =
            GateSpec::with_secret("g", "Polaris").with_match_mode(MatchMode::IgnoreCase);
        assert!(gate.accepts("polaris"));
        assert!(gate.accepts("POLARIS"));
        assert!(gate.accepts(" Polaris "));
    }

    #[test]
    fn interior_whitespace_is_preserved() {
        let gate = GateSpec::with_secret("g", "two words");
        assert!(!gate.accepts("twowords"));
        assert!(!gate.accepts("two  words"));
    }

    #[test]
    fn any_accepted_value_matches() {
        let gate = GateSpec::new("g", vec!["alpha".to_string(), "beta".to_string()]);
        assert!(gate.accepts("alpha"));
        assert!(gate.accepts("beta"));
        assert!(!gate.accepts("gamma"));
    }

    #[test]
    fn defaults_are_masked_exact_with_standard_message() {
        let gate = GateSpec::with_secret("g", "s");
        assert!(gate.masked);
        assert_eq!(gate.match_mode, MatchMode::Exact);
        assert_eq!(gate.error_message, DEFAULT_ERROR_MESSAGE);
        assert!(gate.hint.is_none());
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #[test]
            fn padding_never_changes_the_verdict(
                secret in "[a-zA-Z0-9][a-zA-Z0-9 ]{0,22}[a-zA-Z0-9]",
                left in "[ \t]{0,6}",
                right in "[ \t]{0,6}",
            ) {
                let gate = GateSpec::with_secret("g", secret.clone());
                let padded = format!("{left}{secret}{right}");
                prop_assert!(gate.accepts(&padded));
            }

            #[test]
            fn ignore_case_accepts_any_case_mangle(secret in "[a-z]{1,16}") {
                let gate = GateSpec::with_secret("g", secret.clone())
                    .with_match_mode(MatchMode::IgnoreCase);
                prop_assert!(gate.accepts(&secret.to_uppercase()));
                prop_assert!(gate.accepts(&secret));
            }
        }
    }
}
