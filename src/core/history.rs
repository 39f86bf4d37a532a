//! Bounded record of the transitions a machine has taken.
//!
//! The log is a ring buffer whose storage is reserved up front, so recording
//! never allocates once the machine is built. A capacity of zero disables it.

use super::signal::Signal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// How a recorded transition came about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// First `init` of the machine.
    Initial,
    /// Handler moved to a different handler.
    External,
    /// Handler transitioned to itself (EXIT and ENTRY still ran).
    SelfTransition,
    /// `init` called again under the reset policy.
    Reset,
}

/// One transition taken by a machine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Position of this record among everything the machine ever recorded
    pub sequence: u64,
    /// Signal of the event that caused the transition
    pub trigger: Signal,
    pub kind: TransitionKind,
    pub timestamp: DateTime<Utc>,
}

/// Ring buffer of the most recent transitions.
///
/// # Example
///
/// ```rust
/// use fsm_dispatch::core::{Signal, TransitionKind, TransitionLog};
///
/// let mut log = TransitionLog::with_capacity(2);
/// log.record(Signal::INIT, TransitionKind::Initial);
/// log.record(Signal::user(0), TransitionKind::External);
/// log.record(Signal::user(0), TransitionKind::External);
///
/// assert_eq!(log.len(), 2);
/// assert_eq!(log.total_recorded(), 3);
/// assert_eq!(log.latest().map(|r| r.sequence), Some(2));
/// ```
///
/// A deserialized log is trimmed to its capacity, keeping the newest records.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "StoredLog")]
pub struct TransitionLog {
    capacity: usize,
    records: VecDeque<TransitionRecord>,
    total: u64,
}

#[derive(Deserialize)]
struct StoredLog {
    capacity: usize,
    records: VecDeque<TransitionRecord>,
    total: u64,
}

impl From<StoredLog> for TransitionLog {
    fn from(stored: StoredLog) -> Self {
        let mut log = Self::with_capacity(stored.capacity);
        let skip = stored.records.len().saturating_sub(stored.capacity);
        log.records.extend(stored.records.into_iter().skip(skip));
        let next = log.latest().map_or(0, |r| r.sequence + 1);
        log.total = stored.total.max(next);
        log
    }
}

impl Default for TransitionLog {
    fn default() -> Self {
        Self::disabled()
    }
}

impl TransitionLog {
    /// Log that keeps nothing and never allocates.
    pub fn disabled() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            records: VecDeque::with_capacity(capacity),
            total: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.capacity > 0
    }

    /// Append a record, evicting the oldest one when full.
    ///
    /// The sequence counter advances even when the log is disabled.
    pub fn record(&mut self, trigger: Signal, kind: TransitionKind) {
        let sequence = self.total;
        self.total += 1;

        if !self.is_enabled() {
            return;
        }
        while self.records.len() >= self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(TransitionRecord {
            sequence,
            trigger,
            kind,
            timestamp: Utc::now(),
        });
    }

    /// Retained records, oldest first.
    pub fn records(&self) -> impl Iterator<Item = &TransitionRecord> {
        self.records.iter()
    }

    pub fn latest(&self) -> Option<&TransitionRecord> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of transitions ever recorded, evicted ones included.
    pub fn total_recorded(&self) -> u64 {
        self.total
    }

    /// Time between the oldest and newest retained record.
    ///
    /// Returns `None` when nothing is retained.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_log_keeps_nothing() {
        let mut log = TransitionLog::disabled();
        log.record(Signal::INIT, TransitionKind::Initial);

        assert!(!log.is_enabled());
        assert!(log.is_empty());
        assert_eq!(log.total_recorded(), 1);
        assert!(log.duration().is_none());
    }

    #[test]
    fn records_keep_insertion_order() {
        let mut log = TransitionLog::with_capacity(4);
        log.record(Signal::INIT, TransitionKind::Initial);
        log.record(Signal::user(0), TransitionKind::External);
        log.record(Signal::user(1), TransitionKind::SelfTransition);

        let kinds: Vec<_> = log.records().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TransitionKind::Initial,
                TransitionKind::External,
                TransitionKind::SelfTransition
            ]
        );
    }

    #[test]
    fn full_log_evicts_oldest() {
        let mut log = TransitionLog::with_capacity(2);
        for _ in 0..5 {
            log.record(Signal::user(0), TransitionKind::External);
        }

        let sequences: Vec<_> = log.records().map(|r| r.sequence).collect();
        assert_eq!(sequences, vec![3, 4]);
        assert_eq!(log.capacity(), 2);
        assert_eq!(log.total_recorded(), 5);
    }

    #[test]
    fn duration_spans_retained_records() {
        let mut log = TransitionLog::with_capacity(8);
        log.record(Signal::INIT, TransitionKind::Initial);
        std::thread::sleep(std::time::Duration::from_millis(10));
        log.record(Signal::user(0), TransitionKind::External);

        let duration = log.duration();
        assert!(duration.is_some());
        assert!(duration.unwrap() >= std::time::Duration::from_millis(10));
    }

    #[test]
    fn clear_keeps_sequence_counter() {
        let mut log = TransitionLog::with_capacity(2);
        log.record(Signal::INIT, TransitionKind::Initial);
        log.clear();
        log.record(Signal::user(0), TransitionKind::External);

        assert_eq!(log.len(), 1);
        assert_eq!(log.latest().map(|r| r.sequence), Some(1));
    }

    #[test]
    fn log_serializes_correctly() {
        let mut log = TransitionLog::with_capacity(2);
        log.record(Signal::INIT, TransitionKind::Initial);

        let json = serde_json::to_string(&log).unwrap();
        let deserialized: TransitionLog = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.len(), 1);
        assert_eq!(deserialized.latest(), log.latest());
    }

    #[test]
    fn deserialized_log_is_trimmed_to_capacity() {
        let mut log = TransitionLog::with_capacity(3);
        log.record(Signal::INIT, TransitionKind::Initial);
        log.record(Signal::user(0), TransitionKind::External);
        log.record(Signal::user(1), TransitionKind::External);

        let mut value = serde_json::to_value(&log).unwrap();
        value["capacity"] = serde_json::json!(1);
        let mut restored: TransitionLog = serde_json::from_value(value).unwrap();

        assert_eq!(restored.capacity(), 1);
        assert_eq!(restored.len(), 1);
        assert_eq!(restored.latest().map(|r| r.sequence), Some(2));
        assert_eq!(restored.total_recorded(), 3);

        restored.record(Signal::user(2), TransitionKind::External);

        assert_eq!(restored.len(), 1);
        assert_eq!(restored.latest().map(|r| r.sequence), Some(3));
    }

    #[test]
    fn deserialized_log_keeps_sequence_ahead_of_records() {
        let mut log = TransitionLog::with_capacity(2);
        log.record(Signal::INIT, TransitionKind::Initial);
        log.record(Signal::user(0), TransitionKind::External);

        let mut value = serde_json::to_value(&log).unwrap();
        value["total"] = serde_json::json!(0);
        let mut restored: TransitionLog = serde_json::from_value(value).unwrap();
        restored.record(Signal::user(0), TransitionKind::External);

        let sequences: Vec<_> = restored.records().map(|r| r.sequence).collect();
        assert_eq!(sequences, vec![1, 2]);
    }
}
