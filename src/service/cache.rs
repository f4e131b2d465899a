//! Audit cache: URL-keyed storage of finished results.
//!
//! The store only holds entries; freshness is judged by the engine against
//! [`CACHE_TTL_HOURS`](crate::domain::CACHE_TTL_HOURS). Concurrent writes to
//! the same URL resolve last-write-wins.

use anyhow::Result;
use dashmap::DashMap;

use crate::domain::CacheEntry;

pub trait CacheStore: Send + Sync {
    fn get(&self, url: &str) -> Result<Option<CacheEntry>>;
    fn set(&self, url: &str, entry: CacheEntry) -> Result<()>;
}

/// In-process store backed by a concurrent map. Never fails.
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: DashMap<String, CacheEntry>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CacheStore for MemoryCacheStore {
    fn get(&self, url: &str) -> Result<Option<CacheEntry>> {
        Ok(self.entries.get(url).map(|e| e.clone()))
    }

    fn set(&self, url: &str, entry: CacheEntry) -> Result<()> {
        self.entries.insert(url.to_string(), entry);
        Ok(())
    }
}
