use serde::{Deserialize, Serialize};

/// Price statistics over a set of properties
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSummary {
    pub avg_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub median_price: f64,
    pub total_count: u64,
}

/// Count and mean price for one bedroom-count bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedStatistic {
    /// Bedroom count rendered as text, e.g. "3"
    pub label: String,
    pub count: u64,
    pub average_price: f64,
}
