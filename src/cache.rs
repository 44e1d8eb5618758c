use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::foundation::pixels::PixelBuffer;

/// Default number of cached blur results.
pub const DEFAULT_CACHE_CAPACITY: usize = 10;

/// Cache key derived from the *source* dimensions, requested radius and style
/// tag. Equal inputs always map to the same key; the radius is keyed on its
/// bit pattern so the mapping stays deterministic for any float value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    width: u32,
    height: u32,
    radius_bits: u32,
    style: String,
}

impl CacheKey {
    pub fn new(width: u32, height: u32, radius: f32, style: &str) -> Self {
        Self {
            width,
            height,
            radius_bits: radius.to_bits(),
            style: style.to_owned(),
        }
    }
}

struct CacheEntry {
    pixels: Arc<PixelBuffer>,
    last_access: u64,
    access_count: u64,
}

struct CacheInner {
    entries: HashMap<CacheKey, CacheEntry>,
    // Monotonic access tick; total order makes "oldest" unambiguous.
    tick: u64,
}

/// Bounded blur-result store with least-recently-used eviction.
///
/// Entries hold `Arc<PixelBuffer>` handles, so callers can never mutate cached
/// pixels in place. Interior locking makes get/put/stats safe to call from the
/// blur worker and the interactive thread concurrently.
pub struct BlurCache {
    inner: Mutex<CacheInner>,
    capacity: usize,
}

/// Read-only cache snapshot for diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct CacheStats {
    pub size: usize,
    pub capacity: usize,
    pub total_bytes: usize,
}

impl BlurCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::new(),
                tick: 0,
            }),
            capacity: capacity.max(1),
        }
    }

    /// Look up a cached result, refreshing its access tick and count.
    pub fn get(&self, key: &CacheKey) -> Option<Arc<PixelBuffer>> {
        let mut inner = self.lock();
        inner.tick += 1;
        let tick = inner.tick;
        let entry = inner.entries.get_mut(key)?;
        entry.last_access = tick;
        entry.access_count += 1;
        Some(Arc::clone(&entry.pixels))
    }

    /// Insert a result, evicting least-recently-used entries first so the
    /// store never exceeds its capacity.
    pub fn put(&self, key: CacheKey, pixels: Arc<PixelBuffer>) {
        let mut inner = self.lock();
        if !inner.entries.contains_key(&key) {
            while inner.entries.len() >= self.capacity {
                let oldest = inner
                    .entries
                    .iter()
                    .min_by_key(|(_, entry)| entry.last_access)
                    .map(|(k, _)| k.clone());
                match oldest {
                    Some(oldest) => {
                        inner.entries.remove(&oldest);
                        tracing::debug!(?oldest, "evicted least-recently-used blur result");
                    }
                    None => break,
                }
            }
        }
        inner.tick += 1;
        let tick = inner.tick;
        inner.entries.insert(
            key,
            CacheEntry {
                pixels,
                last_access: tick,
                access_count: 1,
            },
        );
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.lock().entries.contains_key(key)
    }

    /// Drop every entry. Used on engine teardown.
    pub fn clear(&self) {
        self.lock().entries.clear();
    }

    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();
        CacheStats {
            size: inner.entries.len(),
            capacity: self.capacity,
            total_bytes: inner
                .entries
                .values()
                .map(|entry| entry.pixels.byte_size())
                .sum(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheInner> {
        // A poisoned lock only means a panic elsewhere; the map itself is
        // still structurally sound.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for BlurCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
