use unveil_core::StageId;

/// A deferred piece of orchestrator work.
///
/// Everything asynchronous in a story — stage activations, typewriter
/// ticks, media reveals, post-text holds — is one of these values sitting
/// in the [`TimerRegistry`] until its due time. Actions are plain data:
/// the registry owns them between scheduling and firing, and they are
/// destroyed on firing or on bulk cancellation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Activate a stage (idempotent: a non-hidden stage ignores this).
    ActivateStage(StageId),
    /// Start the stage's text phase, after its enter delay.
    BeginText(StageId),
    /// Reveal the next character of the running typewriter session.
    TypeTick,
    /// The stage's text phase is complete (fires after the hold).
    TextFinished(StageId),
    /// Reveal the stage's media.
    RevealMedia(StageId),
}

/// Identifies a scheduled entry. Handles are informational — entries
/// cannot be cancelled individually, only all at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

#[derive(Debug)]
struct Entry {
    due_ms: u64,
    seq: u64,
    action: Action,
}

/// Holds scheduled actions until the story clock reaches them.
///
/// Firing order is `(due_ms, seq)`: earlier deadlines first, insertion
/// order breaking ties. There is no per-entry cancellation; competing
/// triggers are absorbed by idempotent activation guards downstream, and
/// teardown cancels everything at once.
#[derive(Debug, Default)]
pub struct TimerRegistry {
    entries: Vec<Entry>,
    next_seq: u64,
}

impl TimerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an action to fire once the clock reaches `due_ms`.
    pub fn schedule(&mut self, due_ms: u64, action: Action) -> TimerHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Entry {
            due_ms,
            seq,
            action,
        });
        TimerHandle(seq)
    }

    /// Remove and return the next due action, if any.
    ///
    /// Entries are popped one at a time so that actions scheduled during
    /// a drain join the pool and can fire within the same drain.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Action> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_ms <= now_ms)
            .min_by_key(|(_, e)| (e.due_ms, e.seq))
            .map(|(i, _)| i)?;
        Some(self.entries.swap_remove(index).action)
    }

    /// Cancel every pending entry.
    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    /// Number of pending entries.
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Due time of the earliest pending entry, if any.
    pub fn next_due(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.due_ms).min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage(name: &str) -> StageId {
        StageId::new(name)
    }

    #[test]
    fn fires_in_due_order() {
        let mut timers = TimerRegistry::new();
        timers.schedule(300, Action::ActivateStage(stage("b")));
        timers.schedule(100, Action::ActivateStage(stage("a")));
        timers.schedule(200, Action::TypeTick);

        assert_eq!(
            timers.pop_due(1000),
            Some(Action::ActivateStage(stage("a")))
        );
        assert_eq!(timers.pop_due(1000), Some(Action::TypeTick));
        assert_eq!(
            timers.pop_due(1000),
            Some(Action::ActivateStage(stage("b")))
        );
        assert_eq!(timers.pop_due(1000), None);
    }

    #[test]
    fn ties_break_by_insertion_order() {
        let mut timers = TimerRegistry::new();
        let first = timers.schedule(500, Action::TextFinished(stage("x")));
        let second = timers.schedule(500, Action::RevealMedia(stage("x")));
        assert!(first.0 < second.0);

        assert_eq!(
            timers.pop_due(500),
            Some(Action::TextFinished(stage("x")))
        );
        assert_eq!(timers.pop_due(500), Some(Action::RevealMedia(stage("x"))));
    }

    #[test]
    fn nothing_fires_before_its_due_time() {
        let mut timers = TimerRegistry::new();
        timers.schedule(100, Action::TypeTick);
        assert_eq!(timers.pop_due(99), None);
        assert_eq!(timers.pending(), 1);
        assert_eq!(timers.pop_due(100), Some(Action::TypeTick));
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn cancel_all_leaves_nothing_pending() {
        let mut timers = TimerRegistry::new();
        timers.schedule(10, Action::TypeTick);
        timers.schedule(20, Action::ActivateStage(stage("a")));
        timers.cancel_all();
        assert_eq!(timers.pending(), 0);
        assert_eq!(timers.pop_due(u64::MAX), None);
    }

    #[test]
    fn entries_scheduled_mid_drain_can_fire_in_the_same_drain() {
        let mut timers = TimerRegistry::new();
        timers.schedule(50, Action::TypeTick);

        let mut fired = Vec::new();
        while let Some(action) = timers.pop_due(50) {
            if action == Action::TypeTick && fired.is_empty() {
                // Chained follow-up due immediately.
                timers.schedule(50, Action::TextFinished(stage("a")));
            }
            fired.push(action);
        }
        assert_eq!(
            fired,
            vec![Action::TypeTick, Action::TextFinished(stage("a"))]
        );
    }

    #[test]
    fn next_due_reports_the_earliest_deadline() {
        let mut timers = TimerRegistry::new();
        assert_eq!(timers.next_due(), None);
        timers.schedule(400, Action::TypeTick);
        timers.schedule(150, Action::TypeTick);
        assert_eq!(timers.next_due(), Some(150));
    }
}
