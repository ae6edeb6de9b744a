use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use pertgraph_graph::TaskGraph;
use serde::Serialize;
use tracing::debug;

use crate::{ProjectSchedule, Scheduler};

/// Schedules keyed by graph fingerprint and policy. Re-scheduling an
/// unchanged graph is a lookup; any change to names, durations or edges
/// changes the fingerprint and misses.
#[derive(Debug, Default)]
pub struct ScheduleCache {
    entries: DashMap<String, Arc<ProjectSchedule>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

impl ScheduleCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_schedule(&self, scheduler: &Scheduler, graph: &TaskGraph) -> Arc<ProjectSchedule> {
        let key = format!("{}:{}", scheduler.policy(), graph.fingerprint());
        if let Some(hit) = self.entries.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Arc::clone(&hit);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(key = %key, "schedule cache miss");
        let schedule = Arc::new(scheduler.schedule(graph));
        self.entries.insert(key, Arc::clone(&schedule));
        schedule
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}
