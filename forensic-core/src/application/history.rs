// forensic-core/src/application/history.rs
//
// Append-only log of evaluations. Only lightweight entries are kept, never
// the evidence payload. Persistence belongs to the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub rule_id: String,
    pub timestamp: DateTime<Utc>,
    pub compliant: bool,
    pub duration_ms: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RuleStatistics {
    pub evaluations: usize,
    pub compliant: usize,
    pub average_duration_ms: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HistoryStatistics {
    pub total: usize,
    pub compliant: usize,
    pub non_compliant: usize,
    /// Share of compliant evaluations, 0.0 when the log is empty.
    pub compliance_rate: f64,
    pub average_duration_ms: f64,
    pub per_rule: BTreeMap<String, RuleStatistics>,
}

#[derive(Debug, Default)]
pub struct EvaluationHistory {
    entries: Mutex<Vec<HistoryEntry>>,
}

impl EvaluationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave a half-written entry
    // (push is the only mutation), so a poisoned log is still usable.
    fn lock(&self) -> MutexGuard<'_, Vec<HistoryEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn record(&self, entry: HistoryEntry) {
        self.lock().push(entry);
    }

    /// Full log ordered by timestamp; entries with equal timestamps keep append order.
    pub fn entries(&self) -> Vec<HistoryEntry> {
        let mut entries = self.lock().clone();
        entries.sort_by_key(|e| e.timestamp);
        entries
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn statistics(&self) -> HistoryStatistics {
        let entries = self.lock();
        if entries.is_empty() {
            return HistoryStatistics::default();
        }

        let mut per_rule: BTreeMap<String, (RuleStatistics, f64)> = BTreeMap::new();
        let mut compliant = 0;
        let mut total_duration = 0.0;

        for entry in entries.iter() {
            total_duration += entry.duration_ms;
            if entry.compliant {
                compliant += 1;
            }

            let (stats, duration_sum) = per_rule.entry(entry.rule_id.clone()).or_default();
            stats.evaluations += 1;
            if entry.compliant {
                stats.compliant += 1;
            }
            *duration_sum += entry.duration_ms;
        }

        let total = entries.len();
        HistoryStatistics {
            total,
            compliant,
            non_compliant: total - compliant,
            compliance_rate: compliant as f64 / total as f64,
            average_duration_ms: total_duration / total as f64,
            per_rule: per_rule
                .into_iter()
                .map(|(id, (mut stats, duration_sum))| {
                    stats.average_duration_ms = duration_sum / stats.evaluations as f64;
                    (id, stats)
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn entry(rule_id: &str, compliant: bool, duration_ms: f64, offset_ms: i64) -> HistoryEntry {
        HistoryEntry {
            rule_id: rule_id.to_string(),
            timestamp: DateTime::<Utc>::UNIX_EPOCH + Duration::milliseconds(offset_ms),
            compliant,
            duration_ms,
        }
    }

    #[test]
    fn test_entries_sorted_by_timestamp() {
        let history = EvaluationHistory::new();
        history.record(entry("late", true, 1.0, 20));
        history.record(entry("early", false, 1.0, 10));

        let ids: Vec<String> = history.entries().into_iter().map(|e| e.rule_id).collect();
        assert_eq!(ids, vec!["early", "late"]);
    }

    #[test]
    fn test_clear_empties_the_log() {
        let history = EvaluationHistory::new();
        history.record(entry("a", true, 1.0, 0));
        assert_eq!(history.len(), 1);
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.statistics(), HistoryStatistics::default());
    }

    #[test]
    fn test_statistics() {
        let history = EvaluationHistory::new();
        history.record(entry("a", true, 2.0, 0));
        history.record(entry("a", false, 4.0, 1));
        history.record(entry("b", true, 6.0, 2));
        history.record(entry("b", true, 8.0, 3));

        let stats = history.statistics();
        assert_eq!(stats.total, 4);
        assert_eq!(stats.compliant, 3);
        assert_eq!(stats.non_compliant, 1);
        assert_eq!(stats.compliance_rate, 0.75);
        assert_eq!(stats.average_duration_ms, 5.0);
        assert_eq!(stats.per_rule["a"].evaluations, 2);
        assert_eq!(stats.per_rule["a"].compliant, 1);
        assert_eq!(stats.per_rule["a"].average_duration_ms, 3.0);
        assert_eq!(stats.per_rule["b"].average_duration_ms, 7.0);
    }
}
