use std::collections::HashMap;

use unveil_core::{Advance, GateId, MediaId, MediaKind, Script, Stage, StageId, SurfaceId};

use crate::ambient::AmbientPlayer;
use crate::clock::StoryClock;
use crate::config::EngineConfig;
use crate::event::{EventLog, StoryEvent, StoryEventKind};
use crate::gate::{GateOutcome, GateRuntime};
use crate::media::{MediaBoard, MediaRuntime};
use crate::surface::Surface;
use crate::timer::{Action, TimerRegistry};
use crate::typewriter::{BeginOutcome, StepResult, Typewriter};

/// Where a stage is in the reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    /// Not reached yet.
    Hidden,
    /// The current frontier of the story.
    Active,
    /// Revealed and left behind. A passed stage stays visible.
    Passed,
}

/// The top-level playback orchestrator.
///
/// Owns the script, clock, timer registry, typewriter, gates, media,
/// music, and event log, and drives the stage machine from one
/// [`advance`](Orchestrator::advance) call to the next. Playback never
/// fails: a reference to a gate or media item the script does not
/// define makes that stage behave as if the element were absent, and
/// the story carries on around it.
pub struct Orchestrator {
    script: Script,
    config: EngineConfig,
    clock: StoryClock,
    timers: TimerRegistry,
    typewriter: Typewriter,
    surfaces: HashMap<SurfaceId, Surface>,
    gates: HashMap<GateId, GateRuntime>,
    media: MediaBoard,
    ambient: AmbientPlayer,
    statuses: Vec<StageStatus>,
    events: EventLog,
    scroll_requests: Vec<StageId>,
    started: bool,
    finished: bool,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("now_ms", &self.clock.now_ms())
            .field("active", &self.active_stage().map(|stage| stage.id.clone()))
            .field("pending_timers", &self.timers.pending())
            .field("events", &self.events.len())
            .field("finished", &self.finished)
            .finish()
    }
}

impl Orchestrator {
    /// Create an orchestrator over a script and configuration.
    pub fn new(script: Script, config: EngineConfig) -> Self {
        let surfaces = script
            .stages
            .iter()
            .map(|stage| (stage.surface.clone(), Surface::new()))
            .collect();
        let gates = script
            .gates
            .iter()
            .map(|spec| (spec.id.clone(), GateRuntime::new(spec.clone())))
            .collect();
        let media = MediaBoard::new(&script.media);
        let ambient = AmbientPlayer::new(script.ambient.clone());
        let statuses = vec![StageStatus::Hidden; script.stages.len()];
        let events = EventLog::new(config.max_events);
        Self {
            script,
            config,
            clock: StoryClock::new(),
            timers: TimerRegistry::new(),
            typewriter: Typewriter::new(),
            surfaces,
            gates,
            media,
            ambient,
            statuses,
            events,
            scroll_requests: Vec::new(),
            started: false,
            finished: false,
        }
    }

    /// Arm the opening of the story. The first stage activates after
    /// the configured start delay; an empty script finishes at once.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        match self.script.stage_at(0) {
            Some(first) => {
                let first = first.id.clone();
                self.timers.schedule(
                    self.clock.now_ms() + self.config.start_delay_ms,
                    Action::ActivateStage(first),
                );
            }
            None => self.finish_story(),
        }
    }

    /// Move story time forward by `delta_ms` and run everything that
    /// comes due: music rotation, video progress, then timed actions in
    /// due order.
    pub fn advance(&mut self, delta_ms: u64) {
        let now = self.clock.advance(delta_ms);
        if let Some(index) = self.ambient.advance(delta_ms) {
            self.push_event(
                StoryEventKind::AmbientTrackChanged { index },
                format!("Music moved to track {}", index + 1),
            );
        }
        for media_id in self.media.advance(delta_ms) {
            self.media_finished(media_id);
        }
        while let Some(action) = self.timers.pop_due(now) {
            self.apply(action);
        }
    }

    // Timed actions.

    fn apply(&mut self, action: Action) {
        match action {
            Action::ActivateStage(id) => self.activate_stage(&id),
            Action::BeginText(id) => self.begin_text(&id),
            Action::TypeTick => self.type_tick(),
            Action::TextFinished(id) => self.text_finished(&id),
            Action::RevealMedia(id) => self.reveal_media_for(&id),
        }
    }

    /// Make a stage the frontier. Only a hidden stage can activate, so
    /// a second activation of the same stage is a no-op however it was
    /// scheduled.
    fn activate_stage(&mut self, id: &StageId) {
        let Some(pos) = self.script.position_of(id) else {
            return;
        };
        if self.statuses[pos] != StageStatus::Hidden {
            return;
        }
        for status in &mut self.statuses {
            if *status == StageStatus::Active {
                *status = StageStatus::Passed;
            }
        }
        self.statuses[pos] = StageStatus::Active;
        self.push_event(
            StoryEventKind::StageActivated { stage: id.clone() },
            format!("Stage '{id}' began"),
        );
        if !self.config.reduced_motion {
            self.scroll_requests.push(id.clone());
        }
        let enter_delay = self.script.stages[pos].enter_delay_ms;
        self.timers.schedule(
            self.clock.now_ms() + enter_delay,
            Action::BeginText(id.clone()),
        );
    }

    fn begin_text(&mut self, id: &StageId) {
        let Some(stage) = self.script.get_stage(id) else {
            return;
        };
        let surface_id = stage.surface.clone();
        let text = stage.text.clone();
        match self.typewriter.begin(id.clone(), surface_id.clone(), &text) {
            BeginOutcome::Rejected => {}
            BeginOutcome::InstantlyComplete => {
                if let Some(surface) = self.surfaces.get_mut(&surface_id) {
                    surface.begin();
                    surface.finish();
                }
                self.timers.schedule(
                    self.clock.now_ms() + self.config.completion_delay_ms,
                    Action::TextFinished(id.clone()),
                );
            }
            BeginOutcome::Started => {
                if let Some(surface) = self.surfaces.get_mut(&surface_id) {
                    surface.begin();
                }
                self.push_event(
                    StoryEventKind::TextStarted { stage: id.clone() },
                    format!("Text of '{id}' started"),
                );
                // Due immediately: the first character lands in the
                // same drain that began the text.
                self.timers.schedule(self.clock.now_ms(), Action::TypeTick);
            }
        }
    }

    fn type_tick(&mut self) {
        match self.typewriter.step() {
            StepResult::Revealed { surface, ch } => {
                if let Some(target) = self.surfaces.get_mut(&surface) {
                    target.push(ch);
                }
                self.timers.schedule(
                    self.clock.now_ms() + self.config.type_interval_ms(),
                    Action::TypeTick,
                );
            }
            StepResult::Completed { surface, ch, stage } => {
                if let Some(target) = self.surfaces.get_mut(&surface) {
                    target.push(ch);
                    target.finish();
                }
                self.timers.schedule(
                    self.clock.now_ms() + self.config.completion_delay_ms,
                    Action::TextFinished(stage),
                );
            }
            StepResult::Idle => {}
        }
    }

    fn text_finished(&mut self, id: &StageId) {
        let Some(stage) = self.script.get_stage(id) else {
            return;
        };
        let has_media = stage.media.is_some();
        let media_delay = stage.media_delay_ms;
        let advance = stage.advance.clone();
        self.push_event(
            StoryEventKind::TextFinished { stage: id.clone() },
            format!("Text of '{id}' finished"),
        );
        if advance.is_end() {
            self.finish_story();
            return;
        }
        if has_media {
            self.timers.schedule(
                self.clock.now_ms() + media_delay,
                Action::RevealMedia(id.clone()),
            );
        }
        if let Advance::AfterText { pause_ms } = advance {
            self.schedule_next(id, pause_ms);
        }
    }

    /// Reveal a stage's media. The ceiling arms here even when the
    /// media reference is dangling, so a broken reference costs the
    /// story a picture, not its ending.
    fn reveal_media_for(&mut self, id: &StageId) {
        let Some(stage) = self.script.get_stage(id) else {
            return;
        };
        let Some(media_id) = stage.media.clone() else {
            return;
        };
        let advance = stage.advance.clone();
        if self.media.reveal(&media_id) {
            self.push_event(
                StoryEventKind::MediaRevealed {
                    media: media_id.clone(),
                },
                format!("Media '{media_id}' appeared"),
            );
            if !self.config.reduced_motion {
                self.scroll_requests.push(id.clone());
            }
            if self.config.autoplay {
                self.try_autoplay(&media_id);
            }
        }
        if let Advance::AfterMedia {
            ceiling_ms: Some(ceiling),
            ..
        } = advance
        {
            self.schedule_next(id, ceiling);
        }
    }

    fn try_autoplay(&mut self, media_id: &MediaId) {
        let is_video = self
            .media
            .get(media_id)
            .is_some_and(|item| item.spec().kind == MediaKind::Video);
        if !is_video {
            return;
        }
        if self.config.autoplay_allowed {
            self.media_play(media_id);
        } else {
            self.push_event(
                StoryEventKind::AutoplayBlocked {
                    media: media_id.clone(),
                },
                format!("'{media_id}' is ready and waits for a manual start"),
            );
        }
    }

    fn media_finished(&mut self, media_id: MediaId) {
        self.push_event(
            StoryEventKind::MediaFinished {
                media: media_id.clone(),
            },
            format!("'{media_id}' played to the end"),
        );
        if self.ambient.unduck() {
            self.push_event(StoryEventKind::AmbientResumed, "Music back up");
        }
        let owner = self
            .script
            .stages
            .iter()
            .enumerate()
            .find(|(_, stage)| stage.media.as_ref() == Some(&media_id))
            .map(|(pos, stage)| (pos, stage.id.clone(), stage.advance.clone()));
        let Some((pos, stage_id, advance)) = owner else {
            return;
        };
        if self.statuses[pos] != StageStatus::Active {
            return;
        }
        if let Advance::AfterMedia { pause_ms, .. } = advance {
            self.schedule_next(&stage_id, pause_ms);
        }
    }

    fn schedule_next(&mut self, after: &StageId, pause_ms: u64) {
        match self.next_stage_id(after) {
            Some(next) => {
                self.timers
                    .schedule(self.clock.now_ms() + pause_ms, Action::ActivateStage(next));
            }
            None => self.finish_story(),
        }
    }

    fn next_stage_id(&self, id: &StageId) -> Option<StageId> {
        let pos = self.script.position_of(id)?;
        self.script.stage_at(pos + 1).map(|stage| stage.id.clone())
    }

    fn finish_story(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        self.push_event(StoryEventKind::StoryFinished, "The story is over");
    }

    fn push_event(&mut self, kind: StoryEventKind, description: impl Into<String>) {
        self.events
            .push(StoryEvent::new(self.clock.now_ms(), kind, description));
    }

    // Audience actions.

    /// Submit an answer to the frontier stage's gate. Returns `None`
    /// when no gate is listening.
    pub fn submit_gate(&mut self, raw: &str) -> Option<GateOutcome> {
        let (stage_id, gate_id, pause_ms) = self.frontier_gate()?;
        let gate = self.gates.get_mut(&gate_id)?;
        let was_unlocked = gate.is_unlocked();
        let outcome = gate.attempt(raw);
        match outcome {
            GateOutcome::Accepted => {
                // Only the locking-to-unlocked edge moves the story.
                if !was_unlocked {
                    self.push_event(
                        StoryEventKind::GateAccepted {
                            gate: gate_id.clone(),
                        },
                        format!("Gate '{gate_id}' unlocked"),
                    );
                    self.schedule_next(&stage_id, pause_ms);
                }
            }
            GateOutcome::Rejected => {
                self.push_event(
                    StoryEventKind::GateRejected {
                        gate: gate_id.clone(),
                    },
                    format!("Gate '{gate_id}' rejected an answer"),
                );
            }
        }
        Some(outcome)
    }

    /// Show the frontier gate's hint. Returns `true` the first time.
    pub fn reveal_hint(&mut self) -> bool {
        let Some((_, gate_id, _)) = self.frontier_gate() else {
            return false;
        };
        let Some(gate) = self.gates.get_mut(&gate_id) else {
            return false;
        };
        if gate.reveal_hint() {
            self.push_event(
                StoryEventKind::HintRevealed {
                    gate: gate_id.clone(),
                },
                format!("Hint for gate '{gate_id}' revealed"),
            );
            true
        } else {
            false
        }
    }

    /// Flip the frontier gate between masked and plain input echo.
    pub fn toggle_gate_echo(&mut self) {
        if let Some((_, gate_id, _)) = self.frontier_gate() {
            if let Some(gate) = self.gates.get_mut(&gate_id) {
                gate.toggle_echo();
            }
        }
    }

    /// Press the frontier stage's advance button. Returns `true` when
    /// a button was armed and the story moved.
    pub fn press_button(&mut self) -> bool {
        let Some((stage_id, label)) = self
            .armed_button()
            .map(|(id, label)| (id.clone(), label.to_string()))
        else {
            return false;
        };
        self.push_event(
            StoryEventKind::ButtonPressed {
                stage: stage_id.clone(),
            },
            format!("Button '{label}' pressed"),
        );
        match self.next_stage_id(&stage_id) {
            Some(next) => self.activate_stage(&next),
            None => self.finish_story(),
        }
        true
    }

    /// Start or resume a video. Ducks the music under it.
    pub fn media_play(&mut self, id: &MediaId) {
        if !self.media.play(id) {
            return;
        }
        self.push_event(
            StoryEventKind::MediaStarted { media: id.clone() },
            format!("'{id}' started playing"),
        );
        if self.ambient.duck() {
            self.push_event(StoryEventKind::AmbientDucked, "Music ducked under a video");
        }
    }

    /// Pause a playing video. Brings the music back up.
    pub fn media_pause(&mut self, id: &MediaId) {
        if !self.media.pause(id) {
            return;
        }
        self.push_event(
            StoryEventKind::MediaPaused { media: id.clone() },
            format!("'{id}' paused"),
        );
        if self.ambient.unduck() {
            self.push_event(StoryEventKind::AmbientResumed, "Music back up");
        }
    }

    /// Start or stop the background music by hand.
    pub fn toggle_ambient(&mut self) {
        if self.ambient.playlist_len() == 0 {
            return;
        }
        if self.ambient.toggle() {
            self.push_event(StoryEventKind::AmbientStarted, "Music on");
        } else {
            self.push_event(StoryEventKind::AmbientStopped, "Music off");
        }
    }

    /// Note an audience interaction. The very first one starts the
    /// music unprompted, unless the run is configured to stay quiet.
    pub fn user_interacted(&mut self) {
        if !self.config.ambient_autostart {
            return;
        }
        if self.ambient.on_first_interaction() {
            self.push_event(
                StoryEventKind::AmbientStarted,
                "Music started on the first interaction",
            );
        }
    }

    /// Wind the run down: drop every pending timer and pause whatever
    /// is still playing.
    pub fn shutdown(&mut self) {
        self.timers.cancel_all();
        for media_id in self.media.stop_all() {
            self.push_event(
                StoryEventKind::MediaPaused {
                    media: media_id.clone(),
                },
                format!("'{media_id}' paused for shutdown"),
            );
        }
    }

    // Views.

    /// The stage currently at the frontier.
    pub fn active_stage(&self) -> Option<&Stage> {
        self.statuses
            .iter()
            .position(|status| *status == StageStatus::Active)
            .and_then(|pos| self.script.stage_at(pos))
    }

    fn frontier_gate(&self) -> Option<(StageId, GateId, u64)> {
        let stage = self.active_stage()?;
        let gate_id = stage.gate.clone()?;
        let Advance::OnGate { pause_ms } = stage.advance else {
            return None;
        };
        Some((stage.id.clone(), gate_id, pause_ms))
    }

    /// The frontier stage's gate, while one is listening.
    pub fn active_gate(&self) -> Option<&GateRuntime> {
        let stage = self.active_stage()?;
        let gate_id = stage.gate.as_ref()?;
        self.gates.get(gate_id)
    }

    /// The frontier stage's media, once the stage has any.
    pub fn active_media(&self) -> Option<&MediaRuntime> {
        let stage = self.active_stage()?;
        let media_id = stage.media.as_ref()?;
        self.media.get(media_id)
    }

    /// The frontier stage's armed button label, once its text is done.
    pub fn armed_button(&self) -> Option<(&StageId, &str)> {
        let stage = self.active_stage()?;
        let Advance::OnButton { label } = &stage.advance else {
            return None;
        };
        let surface = self.surfaces.get(&stage.surface)?;
        if !surface.is_complete() {
            return None;
        }
        Some((&stage.id, label.as_str()))
    }

    /// A stage's reveal surface.
    pub fn surface(&self, id: &SurfaceId) -> Option<&Surface> {
        self.surfaces.get(id)
    }

    /// Every stage, paired with where it is in the reveal.
    pub fn stages_with_status(&self) -> impl Iterator<Item = (&Stage, StageStatus)> {
        self.script
            .stages
            .iter()
            .zip(self.statuses.iter().copied())
    }

    /// Where a stage is in the reveal.
    pub fn status_of(&self, id: &StageId) -> Option<StageStatus> {
        self.script
            .position_of(id)
            .map(|pos| self.statuses[pos])
    }

    /// One media item's live state.
    pub fn media_runtime(&self, id: &MediaId) -> Option<&MediaRuntime> {
        self.media.get(id)
    }

    /// The background-music player.
    pub fn ambient(&self) -> &AmbientPlayer {
        &self.ambient
    }

    /// The run's event log.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Take the stages that asked to be scrolled into view.
    pub fn drain_scroll_requests(&mut self) -> Vec<StageId> {
        std::mem::take(&mut self.scroll_requests)
    }

    /// The script being played.
    pub fn script(&self) -> &Script {
        &self.script
    }

    /// The configuration of this run.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current story time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// Whether [`start`](Orchestrator::start) has been called.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Whether the final stage has completed.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Number of timed actions still waiting.
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }
}
