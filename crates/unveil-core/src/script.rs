use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ambient::AmbientSpec;
use crate::error::ScriptResult;
use crate::gate::{GateId, GateSpec};
use crate::media::{MediaId, MediaSpec};
use crate::stage::{Advance, Stage, StageId};

/// Descriptive metadata for a script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptMeta {
    /// Title of the story.
    pub title: String,
    /// Author of the story.
    pub author: String,
    /// Free-form script version string.
    pub version: String,
}

impl ScriptMeta {
    /// Create metadata with an empty author and version "1.0".
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: String::new(),
            version: "1.0".to_string(),
        }
    }
}

/// How serious a validation finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The script is broken: a stage can never work as written.
    Error,
    /// The script will run, but something looks unintended.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// One validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptIssue {
    /// How serious the finding is.
    pub severity: Severity,
    /// Human-readable description of the finding.
    pub message: String,
}

impl ScriptIssue {
    /// Create an error-severity issue.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    /// Create a warning-severity issue.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    /// True when this issue has error severity.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ScriptIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// A complete story script: the fixed stage sequence plus the gates, media,
/// and ambient playlist it references.
///
/// Scripts are plain data. Nothing here mutates at runtime; the engine
/// keeps its own state and looks pieces up by id, degrading silently when
/// a reference is missing. [`Script::validate`] is the diagnostic surface
/// for broken references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    /// Descriptive metadata.
    pub meta: ScriptMeta,
    /// The stage sequence, in story order.
    pub stages: Vec<Stage>,
    /// Gate definitions referenced by stages.
    #[serde(default)]
    pub gates: Vec<GateSpec>,
    /// Media definitions referenced by stages.
    #[serde(default)]
    pub media: Vec<MediaSpec>,
    /// Background-music playlist.
    #[serde(default)]
    pub ambient: AmbientSpec,
}

impl Script {
    /// Create an empty script with the given metadata.
    pub fn new(meta: ScriptMeta) -> Self {
        Self {
            meta,
            stages: Vec::new(),
            gates: Vec::new(),
            media: Vec::new(),
            ambient: AmbientSpec::default(),
        }
    }

    /// Parse a script from a JSON string.
    pub fn from_json(json: &str) -> ScriptResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the script as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> ScriptResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Look up a stage by id.
    pub fn get_stage(&self, id: &StageId) -> Option<&Stage> {
        self.stages.iter().find(|s| &s.id == id)
    }

    /// The stage at a sequence position.
    pub fn stage_at(&self, index: usize) -> Option<&Stage> {
        self.stages.get(index)
    }

    /// The sequence position of a stage.
    pub fn position_of(&self, id: &StageId) -> Option<usize> {
        self.stages.iter().position(|s| &s.id == id)
    }

    /// Look up a gate by id.
    pub fn get_gate(&self, id: &GateId) -> Option<&GateSpec> {
        self.gates.iter().find(|g| &g.id == id)
    }

    /// Look up a media item by id.
    pub fn get_media(&self, id: &MediaId) -> Option<&MediaSpec> {
        self.media.iter().find(|m| &m.id == id)
    }

    /// Number of stages in the sequence.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Check the script for broken references and unreachable stages.
    ///
    /// Errors mean some stage can never behave as written; warnings flag
    /// likely authoring mistakes that do not block playback.
    pub fn validate(&self) -> Vec<ScriptIssue> {
        let mut issues = Vec::new();

        if self.stages.is_empty() {
            issues.push(ScriptIssue::error("script has no stages"));
        }

        let mut seen_stages: HashSet<&str> = HashSet::new();
        for stage in &self.stages {
            if !seen_stages.insert(stage.id.as_str()) {
                issues.push(ScriptIssue::error(format!(
                    "duplicate stage id: \"{}\"",
                    stage.id
                )));
            }
        }
        let mut seen_gates: HashSet<&str> = HashSet::new();
        for gate in &self.gates {
            if !seen_gates.insert(gate.id.as_str()) {
                issues.push(ScriptIssue::error(format!(
                    "duplicate gate id: \"{}\"",
                    gate.id
                )));
            }
        }
        let mut seen_media: HashSet<&str> = HashSet::new();
        for media in &self.media {
            if !seen_media.insert(media.id.as_str()) {
                issues.push(ScriptIssue::error(format!(
                    "duplicate media id: \"{}\"",
                    media.id
                )));
            }
        }

        let last_index = self.stages.len().saturating_sub(1);
        for (index, stage) in self.stages.iter().enumerate() {
            self.validate_stage(stage, index, last_index, &mut issues);
        }

        for gate in &self.gates {
            if gate.accepted.is_empty() {
                issues.push(ScriptIssue::error(format!(
                    "gate \"{}\" has no accepted values",
                    gate.id
                )));
            }
            if !self.stages.iter().any(|s| s.gate.as_ref() == Some(&gate.id)) {
                issues.push(ScriptIssue::warning(format!(
                    "gate \"{}\" is never referenced by a stage",
                    gate.id
                )));
            }
        }
        for media in &self.media {
            if !self
                .stages
                .iter()
                .any(|s| s.media.as_ref() == Some(&media.id))
            {
                issues.push(ScriptIssue::warning(format!(
                    "media \"{}\" is never referenced by a stage",
                    media.id
                )));
            }
        }

        if self.ambient.volume > 100 {
            issues.push(ScriptIssue::error(format!(
                "ambient volume {} is out of range (0-100)",
                self.ambient.volume
            )));
        }
        if self.ambient.is_empty() {
            issues.push(ScriptIssue::warning("ambient playlist is empty"));
        }

        issues
    }

    fn validate_stage(
        &self,
        stage: &Stage,
        index: usize,
        last_index: usize,
        issues: &mut Vec<ScriptIssue>,
    ) {
        if let Some(gate_id) = &stage.gate {
            if self.get_gate(gate_id).is_none() {
                issues.push(ScriptIssue::error(format!(
                    "stage \"{}\" references unknown gate \"{gate_id}\"",
                    stage.id
                )));
            }
            if !matches!(stage.advance, Advance::OnGate { .. }) {
                issues.push(ScriptIssue::error(format!(
                    "stage \"{}\" has a gate but does not advance on it",
                    stage.id
                )));
            }
        }
        if let Some(media_id) = &stage.media {
            if self.get_media(media_id).is_none() {
                issues.push(ScriptIssue::error(format!(
                    "stage \"{}\" references unknown media \"{media_id}\"",
                    stage.id
                )));
            }
        }

        match &stage.advance {
            Advance::OnGate { .. } if stage.gate.is_none() => {
                issues.push(ScriptIssue::error(format!(
                    "stage \"{}\" advances on a gate but references none",
                    stage.id
                )));
            }
            Advance::AfterMedia { ceiling_ms, .. } => match &stage.media {
                None => {
                    issues.push(ScriptIssue::error(format!(
                        "stage \"{}\" advances on media but references none",
                        stage.id
                    )));
                }
                Some(media_id) => {
                    let stuck = self
                        .get_media(media_id)
                        .is_some_and(|spec| ceiling_ms.is_none() && !spec.emits_ended());
                    if stuck {
                        issues.push(ScriptIssue::error(format!(
                            "stage \"{}\" waits on media \"{media_id}\" which \
                             never ends, and has no ceiling",
                            stage.id
                        )));
                    }
                }
            },
            Advance::OnButton { label } if label.trim().is_empty() => {
                issues.push(ScriptIssue::warning(format!(
                    "stage \"{}\" has a button with an empty label",
                    stage.id
                )));
            }
            Advance::End if index != last_index => {
                issues.push(ScriptIssue::error(format!(
                    "stage \"{}\" is terminal but not last in the sequence",
                    stage.id
                )));
            }
            _ => {}
        }

        if index == last_index && !stage.advance.is_end() {
            issues.push(ScriptIssue::error(format!(
                "last stage \"{}\" is not terminal",
                stage.id
            )));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::SurfaceId;

    fn sample_script() -> Script {
        let mut script = Script::new(ScriptMeta::new("Sample"));
        script.stages = vec![
            Stage::new(
                "welcome",
                "welcome-text",
                "Hello there.",
                Advance::AfterText { pause_ms: 1000 },
            ),
            Stage::new(
                "door",
                "door-text",
                "A password, please.",
                Advance::OnGate { pause_ms: 500 },
            )
            .with_gate("door-gate"),
            Stage::new(
                "clip",
                "clip-text",
                "Watch this.",
                Advance::AfterMedia {
                    pause_ms: 1000,
                    ceiling_ms: Some(10_000),
                },
            )
            .with_media("clip-video")
            .with_media_delay(1000),
            Stage::new("finale", "finale-text", "The end.", Advance::End),
        ];
        script.gates = vec![GateSpec::with_secret("door-gate", "open sesame")];
        script.media = vec![MediaSpec::video("clip-video", "media/clip.mp4", 8000)];
        script.ambient = AmbientSpec::new(vec!["track-a".into(), "track-b".into()]);
        script
    }

    fn errors_of(script: &Script) -> Vec<String> {
        script
            .validate()
            .into_iter()
            .filter(ScriptIssue::is_error)
            .map(|i| i.message)
            .collect()
    }

    #[test]
    fn sample_script_is_clean() {
        assert!(sample_script().validate().is_empty());
    }

    #[test]
    fn lookups_find_defined_pieces() {
        let script = sample_script();
        assert!(script.get_stage(&StageId::new("door")).is_some());
        assert_eq!(script.position_of(&StageId::new("clip")), Some(2));
        assert!(script.get_gate(&GateId::new("door-gate")).is_some());
        assert!(script.get_media(&MediaId::new("clip-video")).is_some());
        assert!(script.get_stage(&StageId::new("missing")).is_none());
        assert_eq!(script.stage_count(), 4);
    }

    #[test]
    fn duplicate_stage_id_is_an_error() {
        let mut script = sample_script();
        let copy = script.stages[0].clone();
        script.stages.insert(1, copy);
        let errors = errors_of(&script);
        assert!(errors.iter().any(|m| m.contains("duplicate stage id")));
    }

    #[test]
    fn dangling_gate_reference_is_an_error() {
        let mut script = sample_script();
        script.gates.clear();
        let errors = errors_of(&script);
        assert!(errors.iter().any(|m| m.contains("unknown gate")));
    }

    #[test]
    fn dangling_media_reference_is_an_error() {
        let mut script = sample_script();
        script.media.clear();
        let errors = errors_of(&script);
        assert!(errors.iter().any(|m| m.contains("unknown media")));
    }

    #[test]
    fn gate_stage_must_advance_on_gate() {
        let mut script = sample_script();
        script.stages[1].advance = Advance::AfterText { pause_ms: 0 };
        let errors = errors_of(&script);
        assert!(
            errors
                .iter()
                .any(|m| m.contains("does not advance on it"))
        );
    }

    #[test]
    fn on_gate_advance_requires_a_gate() {
        let mut script = sample_script();
        script.stages[1].gate = None;
        let errors = errors_of(&script);
        assert!(errors.iter().any(|m| m.contains("references none")));
    }

    #[test]
    fn after_media_advance_requires_media() {
        let mut script = sample_script();
        script.stages[2].media = None;
        let errors = errors_of(&script);
        assert!(
            errors
                .iter()
                .any(|m| m.contains("advances on media but references none"))
        );
    }

    #[test]
    fn unending_media_without_ceiling_is_an_error() {
        let mut script = sample_script();
        script.media = vec![MediaSpec::photo("clip-video", "media/pic.jpg")];
        script.stages[2].advance = Advance::AfterMedia {
            pause_ms: 0,
            ceiling_ms: None,
        };
        let errors = errors_of(&script);
        assert!(errors.iter().any(|m| m.contains("never ends")));
    }

    #[test]
    fn video_without_ceiling_is_fine_when_it_ends() {
        let mut script = sample_script();
        script.stages[2].advance = Advance::AfterMedia {
            pause_ms: 3000,
            ceiling_ms: None,
        };
        assert!(errors_of(&script).is_empty());
    }

    #[test]
    fn empty_accepted_set_is_an_error() {
        let mut script = sample_script();
        script.gates[0].accepted.clear();
        let errors = errors_of(&script);
        assert!(errors.iter().any(|m| m.contains("no accepted values")));
    }

    #[test]
    fn non_terminal_last_stage_is_an_error() {
        let mut script = sample_script();
        script.stages[3].advance = Advance::AfterText { pause_ms: 0 };
        let errors = errors_of(&script);
        assert!(errors.iter().any(|m| m.contains("is not terminal")));
    }

    #[test]
    fn terminal_stage_before_the_end_is_an_error() {
        let mut script = sample_script();
        script.stages[0].advance = Advance::End;
        let errors = errors_of(&script);
        assert!(errors.iter().any(|m| m.contains("terminal but not last")));
    }

    #[test]
    fn empty_playlist_is_a_warning() {
        let mut script = sample_script();
        script.ambient.tracks.clear();
        let issues = script.validate();
        assert!(
            issues
                .iter()
                .any(|i| !i.is_error() && i.message.contains("playlist is empty"))
        );
        assert!(errors_of(&script).is_empty());
    }

    #[test]
    fn unreferenced_media_is_a_warning() {
        let mut script = sample_script();
        script
            .media
            .push(MediaSpec::photo("stray", "media/stray.jpg"));
        let issues = script.validate();
        assert!(
            issues
                .iter()
                .any(|i| !i.is_error() && i.message.contains("never referenced"))
        );
    }

    #[test]
    fn out_of_range_volume_is_an_error() {
        let mut script = sample_script();
        script.ambient.volume = 130;
        let errors = errors_of(&script);
        assert!(errors.iter().any(|m| m.contains("out of range")));
    }

    #[test]
    fn empty_script_reports_missing_stages() {
        let script = Script::new(ScriptMeta::new("Empty"));
        let errors = errors_of(&script);
        assert!(errors.iter().any(|m| m.contains("no stages")));
    }

    #[test]
    fn json_round_trip_preserves_the_script() {
        let script = sample_script();
        let json = script.to_json_pretty().unwrap();
        let back = Script::from_json(&json).unwrap();
        assert_eq!(back, script);
    }

    #[test]
    fn surface_ids_survive_serialization_as_plain_strings() {
        let script = sample_script();
        let json = script.to_json_pretty().unwrap();
        assert!(json.contains("\"surface\": \"welcome-text\""));
        let back = Script::from_json(&json).unwrap();
        assert_eq!(back.stages[0].surface, SurfaceId::new("welcome-text"));
    }
}
