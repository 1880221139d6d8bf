pub mod export;
pub mod extract;
pub mod health;
pub mod market;
pub mod metrics_handler;
pub mod validation;

use std::sync::Arc;

use crate::{
    cache::ResultCache,
    dataset::Dataset,
    estimator::{EstimationClient, PricePredictor},
};

/// Shared state for the market routes
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub cache: Arc<ResultCache>,
    pub estimator: Arc<EstimationClient>,
}

impl AppState {
    /// Wire the result cache and estimator around one loaded dataset
    pub fn new(dataset: Arc<Dataset>, predictor: Arc<dyn PricePredictor>) -> Self {
        let cache = Arc::new(ResultCache::new(dataset.clone()));
        let estimator = Arc::new(EstimationClient::new(predictor, cache.clone()));
        Self {
            dataset,
            cache,
            estimator,
        }
    }
}
