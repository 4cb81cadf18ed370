//! Single-slot memoization keyed on input identity.
//!
//! Derived views are recomputed if and only if their key changed since the
//! last call. Keys are built from collection generations plus the call's
//! arguments, so an unchanged snapshot always hits.

use std::sync::Arc;

/// Hit/miss counters, mostly for tests and tracing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoStats {
    pub hits: u64,
    pub misses: u64,
}

/// Remembers the last `(key, value)` pair.
#[derive(Debug)]
pub struct Memo<K, V> {
    slot: Option<(K, Arc<V>)>,
    stats: MemoStats,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            slot: None,
            stats: MemoStats::default(),
        }
    }
}

impl<K: PartialEq, V> Memo<K, V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value for `key`, computing it on a miss.
    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> V) -> Arc<V> {
        match self.get_or_try_compute(key, || Ok::<V, std::convert::Infallible>(compute())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Fallible variant; errors are not cached.
    pub fn get_or_try_compute<E>(
        &mut self,
        key: K,
        compute: impl FnOnce() -> Result<V, E>,
    ) -> Result<Arc<V>, E> {
        if let Some((cached_key, value)) = &self.slot {
            if *cached_key == key {
                self.stats.hits += 1;
                return Ok(Arc::clone(value));
            }
        }
        let value = Arc::new(compute()?);
        self.stats.misses += 1;
        self.slot = Some((key, Arc::clone(&value)));
        Ok(value)
    }

    pub fn invalidate(&mut self) {
        self.slot = None;
    }

    #[must_use]
    pub fn stats(&self) -> MemoStats {
        self.stats
    }
}
