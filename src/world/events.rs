//! Bounded narrative event log

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::types::{Day, QuestId, RegionId, StabilityTier};

/// A logged world event
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u64,
    pub day: Day,
    pub kind: LogKind,
    pub region: Option<RegionId>,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogKind {
    // Calendar
    DayStarted { escalation: i32, tension: i32 },
    ThresholdCrossed { threshold: i32 },

    // Anchors
    AnchorResisted { integrity: i32 },
    StabilityChanged { old: StabilityTier, new: StabilityTier },
    AnchorRecovered { amount: i32 },
    AnchorStrengthened { amount: i32 },
    AnchorDefiled { amount: i32 },
    AnchorPurified,

    // Player
    Travel { from: RegionId, days: u32 },

    // Quests
    QuestStarted { quest: QuestId },
    ObjectiveCompleted { quest: QuestId, objective: String },
    QuestCompleted { quest: QuestId },
}

/// Append-only log that keeps only the most recent `capacity` entries
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EventLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    next_id: u64,
}

impl EventLog {
    pub const DEFAULT_CAPACITY: usize = 100;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            next_id: 0,
        }
    }

    pub fn push(
        &mut self,
        day: Day,
        kind: LogKind,
        region: Option<RegionId>,
        message: impl Into<String>,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        // a deserialised log may carry a zero capacity
        let capacity = self.capacity.max(1);
        while self.entries.len() >= capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            id,
            day,
            kind,
            region,
            message: message.into(),
        });

        id
    }

    /// The last `count` entries, oldest first
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &LogEntry> {
        let skip = self.entries.len().saturating_sub(count);
        self.entries.iter().skip(skip)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_days(log: &mut EventLog, days: u32) {
        for day in 0..days {
            log.push(
                day,
                LogKind::DayStarted { escalation: 3, tension: 0 },
                None,
                format!("day {day}"),
            );
        }
    }

    #[test]
    fn test_evicts_oldest_beyond_capacity() {
        let mut log = EventLog::new();
        push_days(&mut log, 130);
        assert_eq!(log.len(), 100);
        assert_eq!(log.iter().next().unwrap().day, 30);
        assert_eq!(log.iter().last().unwrap().day, 129);
    }

    #[test]
    fn test_recent_returns_tail_in_order() {
        let mut log = EventLog::with_capacity(5);
        push_days(&mut log, 8);
        let days: Vec<u32> = log.recent(3).map(|e| e.day).collect();
        assert_eq!(days, vec![5, 6, 7]);
        assert_eq!(log.recent(50).count(), 5);
    }

    #[test]
    fn test_ids_keep_increasing_after_eviction() {
        let mut log = EventLog::with_capacity(2);
        push_days(&mut log, 4);
        let ids: Vec<u64> = log.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_zero_capacity_from_save_keeps_latest() {
        let mut log: EventLog =
            serde_json::from_str(r#"{"entries":[],"capacity":0,"next_id":4}"#).unwrap();
        push_days(&mut log, 3);
        assert_eq!(log.len(), 1);
        assert_eq!(log.iter().next().unwrap().day, 2);
    }
}
