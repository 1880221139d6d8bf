//! Summary and grouped price statistics
//!
//! The median is computed exactly from the sorted price list: the middle
//! element for an odd count, the mean of the two middle elements for an even
//! count.

use std::collections::BTreeMap;

use crate::models::{GroupedStatistic, MarketSummary, PropertyRecord};

/// Count/min/max/avg/median of prices. An empty input gives an all-zero summary.
pub fn summarize(records: &[PropertyRecord]) -> MarketSummary {
    if records.is_empty() {
        return MarketSummary::default();
    }

    let mut prices: Vec<f64> = records.iter().map(|r| r.price).collect();
    prices.sort_by(f64::total_cmp);

    let n = prices.len();
    let sum: f64 = prices.iter().sum();
    let median = if n % 2 == 0 {
        (prices[n / 2 - 1] + prices[n / 2]) / 2.0
    } else {
        prices[n / 2]
    };

    MarketSummary {
        avg_price: sum / n as f64,
        min_price: prices[0],
        max_price: prices[n - 1],
        median_price: median,
        total_count: n as u64,
    }
}

/// Count and mean price per distinct bedroom count, ordered by bedroom count.
///
/// Ordering is numeric on the bedroom value, so "2" comes before "10".
pub fn group_by_bedrooms(records: &[PropertyRecord]) -> Vec<GroupedStatistic> {
    // bedrooms -> (count, price sum)
    let mut buckets: BTreeMap<i32, (u64, f64)> = BTreeMap::new();
    for record in records {
        let bucket = buckets.entry(record.bedrooms).or_insert((0, 0.0));
        bucket.0 += 1;
        bucket.1 += record.price;
    }

    buckets
        .into_iter()
        .map(|(bedrooms, (count, sum))| GroupedStatistic {
            label: bedrooms.to_string(),
            count,
            average_price: sum / count as f64,
        })
        .collect()
}
