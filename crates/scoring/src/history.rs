//! Rolling per-symbol score history.
//!
//! The agent only reads history to phrase trend insights; it never feeds back
//! into the score itself.

use core_types::ScoreRecord;
use parking_lot::RwLock;
use std::collections::{HashMap, VecDeque};

/// Storage for past final scores, keyed by symbol.
pub trait HistoryStore: Send + Sync {
    fn record(&self, symbol: &str, record: ScoreRecord);

    /// Records for `symbol`, oldest first.
    fn recent(&self, symbol: &str) -> Vec<ScoreRecord>;
}

/// A bounded in-process history. The oldest record is evicted once a symbol
/// reaches `capacity` entries.
#[derive(Debug)]
pub struct InMemoryHistory {
    capacity: usize,
    records: RwLock<HashMap<String, VecDeque<ScoreRecord>>>,
}

impl InMemoryHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            records: RwLock::new(HashMap::new()),
        }
    }

    pub fn len(&self, symbol: &str) -> usize {
        self.records.read().get(symbol).map_or(0, VecDeque::len)
    }
}

impl Default for InMemoryHistory {
    fn default() -> Self {
        Self::new(100)
    }
}

impl HistoryStore for InMemoryHistory {
    fn record(&self, symbol: &str, record: ScoreRecord) {
        let mut records = self.records.write();
        let entries = records.entry(symbol.to_string()).or_default();
        if entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(record);
    }

    fn recent(&self, symbol: &str) -> Vec<ScoreRecord> {
        self.records
            .read()
            .get(symbol)
            .map(|entries| entries.iter().cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use core_types::PositionRecommendation;
    use std::sync::Arc;

    fn record(symbol: &str, score: f64) -> ScoreRecord {
        ScoreRecord {
            symbol: symbol.to_string(),
            final_score: score,
            position: PositionRecommendation::Neutral,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn evicts_oldest_beyond_capacity() {
        let history = InMemoryHistory::new(3);
        for i in 0..5 {
            history.record("BTC", record("BTC", i as f64));
        }
        let recent = history.recent("BTC");
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].final_score, 2.0);
        assert_eq!(recent[2].final_score, 4.0);
    }

    #[test]
    fn symbols_are_kept_apart() {
        let history = InMemoryHistory::default();
        history.record("BTC", record("BTC", 60.0));
        history.record("ETH", record("ETH", 40.0));
        assert_eq!(history.len("BTC"), 1);
        assert_eq!(history.recent("ETH")[0].final_score, 40.0);
        assert!(history.recent("SOL").is_empty());
    }

    #[test]
    fn concurrent_writers_respect_the_bound() {
        let history = Arc::new(InMemoryHistory::new(50));
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let history = Arc::clone(&history);
                std::thread::spawn(move || {
                    for i in 0..40 {
                        history.record("BTC", record("BTC", (t * 100 + i) as f64));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(history.len("BTC"), 50);
    }
}
