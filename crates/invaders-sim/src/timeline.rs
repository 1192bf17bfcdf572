//! Deterministic delayed-action scheduler.
//!
//! Everything that happens "N ms from now" goes through here: staggered
//! enemy spawns, survival pulses, the next wave, barrage volleys and the
//! results screen. Actions are keyed by due time in simulation ms; ties
//! fire in insertion order.

use hecs::Entity;

/// Something the simulation should do later.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduledAction {
    /// One staggered spawn of a kill-count wave.
    SpawnEnemy { wave: usize },
    /// One spawn pulse of a survival wave. Reschedules itself.
    SurvivalPulse { wave: usize },
    /// End of a survival wave's spawn phase.
    EndSurvivalSpawn { wave: usize },
    NextWave,
    /// One volley of a boss barrage.
    BarrageVolley { boss: Entity, attack: usize },
    ShowResults,
}

#[derive(Debug, Clone)]
struct Entry {
    due_ms: f64,
    seq: u64,
    action: ScheduledAction,
}

#[derive(Debug, Clone, Default)]
pub struct Timeline {
    entries: Vec<Entry>,
    next_seq: u64,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` at absolute time `due_ms`.
    pub fn schedule_at(&mut self, due_ms: f64, action: ScheduledAction) {
        self.entries.push(Entry {
            due_ms,
            seq: self.next_seq,
            action,
        });
        self.next_seq += 1;
    }

    /// Schedule `action` `delay_ms` after `now_ms`.
    pub fn schedule_after(&mut self, now_ms: f64, delay_ms: f64, action: ScheduledAction) {
        self.schedule_at(now_ms + delay_ms.max(0.0), action);
    }

    /// Remove and return every action due at or before `now_ms`, in firing
    /// order.
    pub fn drain_due(&mut self, now_ms: f64) -> Vec<ScheduledAction> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].due_ms <= now_ms {
                due.push(self.entries.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|e| e.action).collect()
    }

    /// Count pending actions matching `pred`.
    pub fn count_pending(&self, pred: impl Fn(&ScheduledAction) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.action)).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_time_then_insertion_order() {
        let mut timeline = Timeline::new();
        timeline.schedule_at(200.0, ScheduledAction::NextWave);
        timeline.schedule_at(100.0, ScheduledAction::SpawnEnemy { wave: 0 });
        timeline.schedule_at(100.0, ScheduledAction::SpawnEnemy { wave: 1 });
        timeline.schedule_at(500.0, ScheduledAction::ShowResults);

        assert!(timeline.drain_due(50.0).is_empty());
        let due = timeline.drain_due(200.0);
        assert_eq!(
            due,
            vec![
                ScheduledAction::SpawnEnemy { wave: 0 },
                ScheduledAction::SpawnEnemy { wave: 1 },
                ScheduledAction::NextWave,
            ]
        );
        assert_eq!(timeline.len(), 1);
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut timeline = Timeline::new();
        timeline.schedule_after(0.0, 10.0, ScheduledAction::NextWave);
        timeline.clear();
        assert!(timeline.is_empty());
        assert!(timeline.drain_due(1e9).is_empty());
    }

    #[test]
    fn test_count_pending() {
        let mut timeline = Timeline::new();
        for i in 0..3 {
            timeline.schedule_after(0.0, i as f64 * 800.0, ScheduledAction::SpawnEnemy { wave: 2 });
        }
        timeline.schedule_after(0.0, 5.0, ScheduledAction::NextWave);
        let spawns =
            timeline.count_pending(|a| matches!(a, ScheduledAction::SpawnEnemy { wave: 2 }));
        assert_eq!(spawns, 3);
    }
}
