//! Process-lifetime memo of research-stage results
//!
//! Keys are the SHA-256 hex digest of the trimmed, lowercased topic. Each entry
//! is stamped by an [`InsertionClock`] when first inserted; once the cache holds
//! more than its limit, the entry with the lowest stamp is evicted.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use sha2::{Digest, Sha256};
use shared::{stage_debug, Stage, StateUpdate};
use tokio::sync::Mutex;

/// Source of insertion stamps; later inserts must receive larger stamps
#[mockall::automock]
pub trait InsertionClock: Send + Sync {
    fn tick(&self) -> u64;
}

/// Monotonic counter starting at zero
#[derive(Debug, Default)]
pub struct SequenceClock {
    next: AtomicU64,
}

impl InsertionClock for SequenceClock {
    fn tick(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    stamp: u64,
    value: StateUpdate,
}

pub fn normalize_topic(topic: &str) -> String {
    topic.trim().to_lowercase()
}

pub fn cache_key(topic: &str) -> String {
    hex::encode(Sha256::digest(normalize_topic(topic).as_bytes()))
}

pub struct ResearchCache {
    enabled: bool,
    limit: usize,
    clock: Box<dyn InsertionClock>,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl ResearchCache {
    pub fn new(enabled: bool, limit: usize) -> Self {
        Self::with_clock(enabled, limit, Box::new(SequenceClock::default()))
    }

    pub fn with_clock(enabled: bool, limit: usize, clock: Box<dyn InsertionClock>) -> Self {
        Self {
            enabled,
            limit: limit.max(1),
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub async fn get(&self, topic: &str) -> Option<StateUpdate> {
        if !self.enabled {
            return None;
        }
        let entries = self.entries.lock().await;
        entries.get(&cache_key(topic)).map(|entry| entry.value.clone())
    }

    pub async fn put(&self, topic: &str, value: StateUpdate) {
        if !self.enabled {
            return;
        }

        let key = cache_key(topic);
        let mut entries = self.entries.lock().await;

        // Overwrites keep their original stamp
        if let Some(entry) = entries.get_mut(&key) {
            entry.value = value;
            return;
        }

        let stamp = self.clock.tick();
        entries.insert(key, CacheEntry { stamp, value });

        if entries.len() > self.limit {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.stamp)
                .map(|(key, _)| key.clone());
            if let Some(oldest) = oldest {
                entries.remove(&oldest);
                stage_debug!(Stage::Research, "🧹 Evicted cache entry {}", &oldest[..12]);
            }
        }
    }

    pub async fn contains(&self, topic: &str) -> bool {
        self.enabled && self.entries.lock().await.contains_key(&cache_key(topic))
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }
}
