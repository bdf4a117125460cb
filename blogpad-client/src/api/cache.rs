//! Query result cache keyed by [`Query`], invalidated through tags.

use super::definitions::Query;
use super::tags::Tag;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct CacheEntry {
    data: Value,
    tags: Vec<Tag>,
    stale: bool,
    fetched_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<Query, CacheEntry>,
    /// Active views per query
    watchers: HashMap<Query, usize>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh cached data, if any
    pub fn get(&self, query: &Query) -> Option<&Value> {
        self.entries
            .get(query)
            .filter(|entry| !entry.stale)
            .map(|entry| &entry.data)
    }

    pub fn fetched_at(&self, query: &Query) -> Option<DateTime<Utc>> {
        self.entries.get(query).map(|entry| entry.fetched_at)
    }

    pub fn is_stale(&self, query: &Query) -> bool {
        self.entries.get(query).map(|e| e.stale).unwrap_or(false)
    }

    pub fn insert(&mut self, query: Query, data: Value) {
        let tags = query.provides();
        self.entries.insert(
            query,
            CacheEntry {
                data,
                tags,
                stale: false,
                fetched_at: Utc::now(),
            },
        );
    }

    /// Mark every entry providing a matching tag as stale. Returns the
    /// affected queries.
    pub fn invalidate(&mut self, tags: &[Tag]) -> Vec<Query> {
        let mut affected = Vec::new();
        for (query, entry) in self.entries.iter_mut() {
            let hit = entry
                .tags
                .iter()
                .any(|provided| tags.iter().any(|tag| tag.matches(provided)));
            if hit {
                entry.stale = true;
                affected.push(query.clone());
            }
        }
        affected
    }

    pub fn watch(&mut self, query: Query) {
        *self.watchers.entry(query).or_insert(0) += 1;
    }

    pub fn unwatch(&mut self, query: &Query) {
        if let Some(count) = self.watchers.get_mut(query) {
            *count -= 1;
            if *count == 0 {
                self.watchers.remove(query);
            }
        }
    }

    pub fn is_watched(&self, query: &Query) -> bool {
        self.watchers.contains_key(query)
    }

    pub fn remove(&mut self, query: &Query) {
        self.entries.remove(query);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
