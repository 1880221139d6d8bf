//! Memoized market queries
//!
//! Every distinct filter key is computed at most once for the life of the
//! process. The dataset never changes after load, so entries are never
//! invalidated.
//!
//! Each memo is a sharded `DashMap` from key to a per-key `OnceLock`. The map
//! shard lock is held only long enough to fetch or insert the cell (a read
//! lock when the cell already exists); the
//! computation itself runs under the cell's own initialization lock, so
//! callers racing on the same key wait for a single computation while other
//! keys proceed independently.

use dashmap::DashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::debug;

use crate::{
    analytics::{filter, group_by_bedrooms, summarize},
    dataset::Dataset,
    metrics,
    models::{Bound, FilterCriteria, GroupedStatistic, MarketSummary, PropertyRecord},
};

// ============================================================
// Memo
// ============================================================

/// Get-or-compute map with at-most-one computation per key
pub struct Memo<K, V> {
    name: &'static str,
    entries: DashMap<K, Arc<OnceLock<V>>>,
    computations: AtomicU64,
}

impl<K, V> Memo<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: DashMap::new(),
            computations: AtomicU64::new(0),
        }
    }

    /// Return the memoized value for `key`, running `compute` only if no
    /// value exists yet. Concurrent callers for the same key block until the
    /// first computation finishes and then share its result.
    pub fn get_or_compute(&self, key: K, compute: impl FnOnce() -> V) -> V {
        // hits only take the shard read lock
        let existing = self.entries.get(&key).map(|entry| Arc::clone(entry.value()));
        let cell = match existing {
            Some(cell) => cell,
            None => Arc::clone(self.entries.entry(key).or_default().value()),
        };

        let mut computed = false;
        let value = cell.get_or_init(|| {
            computed = true;
            self.computations.fetch_add(1, Ordering::Relaxed);
            metrics::record_cache_computation(self.name);
            compute()
        });
        metrics::record_cache_lookup(self.name, !computed);

        value.clone()
    }

    /// Number of keys seen so far
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of computations actually executed
    pub fn computations(&self) -> u64 {
        self.computations.load(Ordering::Relaxed)
    }
}

// ============================================================
// Cache key
// ============================================================

/// Hashable form of [`FilterCriteria`]
///
/// Float bounds are keyed by bit pattern; `Bound::Unbounded` stays its own
/// variant so it can never collide with a numeric bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CriteriaKey {
    min_price: Bound<u64>,
    max_price: Bound<u64>,
    min_bedrooms: Bound<i32>,
    max_bedrooms: Bound<i32>,
    min_school_rating: Bound<u64>,
    max_school_rating: Bound<u64>,
}

fn float_key(value: f64) -> u64 {
    // -0.0 and 0.0 filter identically
    (value + 0.0).to_bits()
}

impl From<&FilterCriteria> for CriteriaKey {
    fn from(c: &FilterCriteria) -> Self {
        Self {
            min_price: c.min_price.map(float_key),
            max_price: c.max_price.map(float_key),
            min_bedrooms: c.min_bedrooms,
            max_bedrooms: c.max_bedrooms,
            min_school_rating: c.min_school_rating.map(float_key),
            max_school_rating: c.max_school_rating.map(float_key),
        }
    }
}

// ============================================================
// ResultCache
// ============================================================

/// Entry and computation counts per memo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub segment_entries: usize,
    pub summary_entries: usize,
    pub distribution_entries: usize,
    pub computations: u64,
}

/// Memoized filter/summary/distribution queries over one dataset
pub struct ResultCache {
    dataset: Arc<Dataset>,
    segments: Memo<CriteriaKey, Arc<[PropertyRecord]>>,
    summaries: Memo<CriteriaKey, MarketSummary>,
    distributions: Memo<CriteriaKey, Arc<[GroupedStatistic]>>,
}

impl ResultCache {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self {
            dataset,
            segments: Memo::new("segments"),
            summaries: Memo::new("summary"),
            distributions: Memo::new("bedroom_distribution"),
        }
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    /// Records matching `criteria`, in dataset order
    pub fn segments(&self, criteria: &FilterCriteria) -> Arc<[PropertyRecord]> {
        self.segments.get_or_compute(criteria.into(), || {
            let matched = filter(self.dataset.records(), criteria);
            debug!(?criteria, matched = matched.len(), "Computed market segment");
            matched.into()
        })
    }

    /// Summary statistics over the records matching `criteria`
    pub fn summary(&self, criteria: &FilterCriteria) -> MarketSummary {
        self.summaries.get_or_compute(criteria.into(), || {
            let summary = if criteria.is_unbounded() {
                summarize(self.dataset.records())
            } else {
                summarize(&self.segments(criteria))
            };
            debug!(?criteria, count = summary.total_count, "Computed market summary");
            summary
        })
    }

    /// Per-bedroom statistics over the records matching `criteria`
    pub fn bedroom_distribution(&self, criteria: &FilterCriteria) -> Arc<[GroupedStatistic]> {
        self.distributions.get_or_compute(criteria.into(), || {
            let groups = group_by_bedrooms(&self.segments(criteria));
            debug!(?criteria, groups = groups.len(), "Computed bedroom distribution");
            groups.into()
        })
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            segment_entries: self.segments.len(),
            summary_entries: self.summaries.len(),
            distribution_entries: self.distributions.len(),
            computations: self.segments.computations()
                + self.summaries.computations()
                + self.distributions.computations(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::property::sample;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Barrier;
    use std::thread;
    use std::time::Duration;

    fn test_cache() -> ResultCache {
        let dataset = Dataset::new(vec![
            sample(100.0, 1, 9.0),
            sample(200.0, 1, 6.0),
            sample(300.0, 3, 8.0),
            sample(400.0, 2, 3.0),
        ]);
        ResultCache::new(Arc::new(dataset))
    }

    #[test]
    fn test_memo_computes_once_per_key() {
        let memo: Memo<u32, u32> = Memo::new("test");
        let calls = AtomicUsize::new(0);

        let compute = |v: u32| {
            calls.fetch_add(1, Ordering::SeqCst);
            v * 2
        };

        assert_eq!(memo.get_or_compute(1, || compute(1)), 2);
        assert_eq!(memo.get_or_compute(1, || compute(1)), 2);
        assert_eq!(memo.get_or_compute(2, || compute(2)), 4);

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(memo.computations(), 2);
        assert_eq!(memo.len(), 2);
    }

    #[test]
    fn test_memo_concurrent_same_key_computes_once() {
        let memo: Memo<&'static str, u64> = Memo::new("test");
        let calls = AtomicUsize::new(0);
        let barrier = Barrier::new(8);

        let results: Vec<u64> = thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    s.spawn(|| {
                        barrier.wait();
                        memo.get_or_compute("same", || {
                            calls.fetch_add(1, Ordering::SeqCst);
                            thread::sleep(Duration::from_millis(50));
                            42
                        })
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(results.iter().all(|&v| v == 42));
    }

    #[test]
    fn test_memo_hit_does_not_need_write_lock() {
        let memo: Memo<u32, u32> = Memo::new("test");
        memo.get_or_compute(7, || 70);

        let (tx, rx) = std::sync::mpsc::channel();
        thread::scope(|s| {
            // A reader pins the shard; a hit must still get through
            let guard = memo.entries.get(&7).unwrap();
            let memo = &memo;
            s.spawn(move || {
                let value = memo.get_or_compute(7, || unreachable!());
                tx.send(value).unwrap();
            });

            let value = rx.recv_timeout(Duration::from_secs(2));
            drop(guard);
            assert_eq!(value, Ok(70));
        });
        assert_eq!(memo.computations(), 1);
    }

    #[test]
    fn test_memo_distinct_keys_compute_independently() {
        let memo: Memo<u32, u32> = Memo::new("test");
        let calls = AtomicUsize::new(0);

        thread::scope(|s| {
            for key in 0..4u32 {
                let memo = &memo;
                let calls = &calls;
                s.spawn(move || {
                    memo.get_or_compute(key, || {
                        calls.fetch_add(1, Ordering::SeqCst);
                        key
                    })
                });
            }
        });

        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert_eq!(memo.len(), 4);
    }

    #[test]
    fn test_unbounded_and_zero_keys_differ() {
        let unbounded = FilterCriteria::unbounded();
        let zero_min = FilterCriteria {
            min_price: Bound::At(0.0),
            ..Default::default()
        };

        assert_ne!(CriteriaKey::from(&unbounded), CriteriaKey::from(&zero_min));
    }

    #[test]
    fn test_negative_zero_shares_key() {
        let a = FilterCriteria {
            min_price: Bound::At(0.0),
            ..Default::default()
        };
        let b = FilterCriteria {
            min_price: Bound::At(-0.0),
            ..Default::default()
        };

        assert_eq!(CriteriaKey::from(&a), CriteriaKey::from(&b));
    }

    #[test]
    fn test_cached_values_match_fresh_computation() {
        let cache = test_cache();
        let criteria = FilterCriteria {
            min_school_rating: Bound::At(5.0),
            ..Default::default()
        };

        let fresh_segment = filter(cache.dataset().records(), &criteria);
        let fresh_summary = summarize(&fresh_segment);
        let fresh_groups = group_by_bedrooms(&fresh_segment);

        for _ in 0..3 {
            assert_eq!(&*cache.segments(&criteria), fresh_segment.as_slice());
            assert_eq!(cache.summary(&criteria), fresh_summary);
            assert_eq!(&*cache.bedroom_distribution(&criteria), fresh_groups.as_slice());
        }
    }

    #[test]
    fn test_repeat_queries_do_not_recompute() {
        let cache = test_cache();
        let criteria = FilterCriteria {
            max_bedrooms: Bound::At(2),
            ..Default::default()
        };

        cache.bedroom_distribution(&criteria);
        let after_first = cache.stats();
        cache.bedroom_distribution(&criteria);
        cache.segments(&criteria);

        assert_eq!(cache.stats(), after_first);
        assert_eq!(after_first.segment_entries, 1);
        assert_eq!(after_first.distribution_entries, 1);
        assert_eq!(after_first.computations, 2);
    }

    #[test]
    fn test_full_summary_skips_segment_copy() {
        let cache = test_cache();

        let summary = cache.summary(&FilterCriteria::unbounded());
        assert_eq!(summary.total_count, 4);
        assert_eq!(summary.avg_price, 250.0);
        assert_eq!(cache.stats().segment_entries, 0);
    }

    #[test]
    fn test_concurrent_identical_criteria_compute_once() {
        let cache = test_cache();
        let criteria = FilterCriteria {
            min_bedrooms: Bound::At(1),
            max_price: Bound::At(350.0),
            ..Default::default()
        };
        let barrier = Barrier::new(2);

        let (a, b) = thread::scope(|s| {
            let first = s.spawn(|| {
                barrier.wait();
                cache.summary(&criteria)
            });
            let second = s.spawn(|| {
                barrier.wait();
                cache.summary(&criteria)
            });
            (first.join().unwrap(), second.join().unwrap())
        });

        assert_eq!(a, b);
        assert_eq!(a.total_count, 3);
        // one summary + one segment
        assert_eq!(cache.stats().computations, 2);
    }
}
