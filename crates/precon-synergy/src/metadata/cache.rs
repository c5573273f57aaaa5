use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::MetadataProvider;
use crate::cards::{card_key, CardAttributes};

/// Bounds for [`CachedMetadataProvider`]. A capacity of zero disables caching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachePolicy {
    pub capacity: usize,
    #[serde(default)]
    pub ttl: Option<Duration>,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            capacity: 1000,
            ttl: None,
        }
    }
}

impl CachePolicy {
    pub fn disabled() -> Self {
        Self {
            capacity: 0,
            ttl: None,
        }
    }
}

struct Slot {
    created: Instant,
    value: OnceLock<Option<CardAttributes>>,
}

impl Slot {
    fn fresh() -> Arc<Self> {
        Arc::new(Self {
            created: Instant::now(),
            value: OnceLock::new(),
        })
    }
}

#[derive(Default)]
struct Entries {
    slots: HashMap<String, Arc<Slot>>,
    order: VecDeque<String>,
}

/// Memoises name lookups of an inner provider, absent results included.
///
/// Concurrent lookups of one name share a slot, so the inner provider sees each name once
/// per slot lifetime. Entries are evicted oldest-first once `capacity` is reached and
/// replaced once older than `ttl`. Searches always go to the inner provider.
pub struct CachedMetadataProvider<P> {
    inner: P,
    policy: CachePolicy,
    entries: Mutex<Entries>,
}

impl<P: MetadataProvider> CachedMetadataProvider<P> {
    pub fn new(inner: P, policy: CachePolicy) -> Self {
        Self {
            inner,
            policy,
            entries: Mutex::new(Entries::default()),
        }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .expect("metadata cache mutex poisoned")
            .slots
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut entries = self.entries.lock().expect("metadata cache mutex poisoned");
        entries.slots.clear();
        entries.order.clear();
    }

    fn slot(&self, key: String) -> Arc<Slot> {
        let mut entries = self.entries.lock().expect("metadata cache mutex poisoned");

        if let Some(slot) = entries.slots.get(&key) {
            let expired = self
                .policy
                .ttl
                .is_some_and(|ttl| slot.created.elapsed() >= ttl);
            if !expired {
                return Arc::clone(slot);
            }
            entries.slots.remove(&key);
            entries.order.retain(|queued| *queued != key);
        }

        while entries.slots.len() >= self.policy.capacity {
            let Some(oldest) = entries.order.pop_front() else {
                break;
            };
            entries.slots.remove(&oldest);
        }

        let slot = Slot::fresh();
        entries.order.push_back(key.clone());
        entries.slots.insert(key, Arc::clone(&slot));
        slot
    }
}

impl<P: MetadataProvider> MetadataProvider for CachedMetadataProvider<P> {
    fn attributes(&self, name: &str) -> Option<CardAttributes> {
        if self.policy.capacity == 0 {
            return self.inner.attributes(name);
        }
        let slot = self.slot(card_key(name));
        slot.value
            .get_or_init(|| self.inner.attributes(name))
            .clone()
    }

    fn search(&self, query: &str) -> Vec<CardAttributes> {
        self.inner.search(query)
    }
}
