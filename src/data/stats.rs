//! Per-topic message counters.
//!
//! Two tables are kept: live counts accumulate across frames until reset,
//! preloaded counts are rebuilt from each new snapshot. Both are cleared and
//! refilled in place; the containers themselves live as long as the panel.

use std::collections::HashMap;

use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TopicStats {
    pub message_count: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TotalStats {
    pub message_count: u64,
}

/// Message counts keyed by topic name.
#[derive(Debug, Clone, Default)]
pub struct StatsTable {
    by_topic: HashMap<String, TopicStats>,
}

impl StatsTable {
    fn count(&mut self, topic: &str) {
        match self.by_topic.get_mut(topic) {
            Some(stats) => stats.message_count += 1,
            None => {
                self.by_topic
                    .insert(topic.to_string(), TopicStats { message_count: 1 });
            }
        }
    }

    pub fn get(&self, topic: &str) -> Option<&TopicStats> {
        self.by_topic.get(topic)
    }

    /// Count for `topic`, zero when it has no entry.
    pub fn message_count(&self, topic: &str) -> u64 {
        self.get(topic).map(|s| s.message_count).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.by_topic.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_topic.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TopicStats)> {
        self.by_topic.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn total(&self) -> u64 {
        self.by_topic.values().map(|s| s.message_count).sum()
    }

    fn clear(&mut self) {
        self.by_topic.clear();
    }
}

/// Live, preloaded, and total message statistics for the panel.
#[derive(Debug, Clone)]
pub struct StatisticsAggregator {
    live: StatsTable,
    preloaded: StatsTable,
    total: TotalStats,
    live_since: DateTime<Local>,
}

impl Default for StatisticsAggregator {
    fn default() -> Self {
        Self {
            live: StatsTable::default(),
            preloaded: StatsTable::default(),
            total: TotalStats::default(),
            live_since: Local::now(),
        }
    }
}

impl StatisticsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every message of a live frame against its topic.
    pub fn record_live<'a>(&mut self, topics: impl IntoIterator<Item = &'a str>) {
        for topic in topics {
            self.live.count(topic);
        }
    }

    /// Replace the preloaded counts with those of `snapshot`.
    pub fn replace_preloaded<'a>(&mut self, snapshot: impl IntoIterator<Item = &'a str>) {
        self.preloaded.clear();
        for topic in snapshot {
            self.preloaded.count(topic);
        }
    }

    /// Drop all live counts. Preloaded counts and the last computed total are
    /// left alone; the total catches up on the next refresh.
    pub fn reset_live(&mut self) {
        self.live.clear();
        self.live_since = Local::now();
    }

    /// Recompute the total from the live table.
    pub fn refresh_total(&mut self) -> TotalStats {
        self.total = TotalStats {
            message_count: self.live.total(),
        };
        self.total
    }

    pub fn live(&self) -> &StatsTable {
        &self.live
    }

    pub fn preloaded(&self) -> &StatsTable {
        &self.preloaded
    }

    /// Total as of the last [`refresh_total`](Self::refresh_total).
    pub fn total(&self) -> TotalStats {
        self.total
    }

    /// When live counting last started (panel mount or reset).
    pub fn live_since(&self) -> DateTime<Local> {
        self.live_since
    }
}
