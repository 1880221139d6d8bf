//! What-if price estimation
//!
//! The prediction itself comes from an external service reached through a
//! [`PricePredictor`]; [`EstimationClient`] pairs that prediction with the
//! market average from the loaded dataset.
//!
//! Failures are never masked: a missing or malformed prediction is an error,
//! not a zero price.

pub mod http;

pub use http::HttpPricePredictor;

use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::{
    cache::ResultCache,
    metrics,
    models::{FilterCriteria, WhatIfInput, WhatIfResult},
};

/// Why an estimate could not be produced
#[derive(Debug, thiserror::Error)]
pub enum EstimationError {
    /// Transport failure: connection refused, DNS, timeout
    #[error("Estimation service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Service answered with a non-success status or no body
    #[error("Estimation service error ({status}): {message}")]
    UpstreamError { status: StatusCode, message: String },

    /// Body present but without a usable prediction
    #[error("Invalid estimation response: {0}")]
    InvalidResponse(String),
}

impl EstimationError {
    /// Stable label for metrics and error payloads
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ServiceUnavailable(_) => "service_unavailable",
            Self::UpstreamError { .. } => "upstream_error",
            Self::InvalidResponse(_) => "invalid_response",
        }
    }
}

/// Source of price predictions for a single feature vector
#[async_trait]
pub trait PricePredictor: Send + Sync {
    async fn predict(&self, input: &WhatIfInput) -> Result<f64, EstimationError>;
}

/// Combines external predictions with the dataset's market average
pub struct EstimationClient {
    predictor: Arc<dyn PricePredictor>,
    cache: Arc<ResultCache>,
}

impl EstimationClient {
    pub fn new(predictor: Arc<dyn PricePredictor>, cache: Arc<ResultCache>) -> Self {
        Self { predictor, cache }
    }

    /// Predict a price for `input` and compare it to the market average.
    ///
    /// Every call goes to the predictor; results are not cached.
    pub async fn estimate(&self, input: &WhatIfInput) -> Result<WhatIfResult, EstimationError> {
        let started = Instant::now();
        let predicted = self.predictor.predict(input).await;
        let elapsed = started.elapsed();

        let predicted_price = match predicted {
            Ok(price) => {
                metrics::record_estimator_request("success", elapsed);
                price
            }
            Err(e) => {
                metrics::record_estimator_request(e.kind(), elapsed);
                warn!(error = %e, kind = e.kind(), "Price estimation failed");
                return Err(e);
            }
        };

        let market_average = self.cache.summary(&FilterCriteria::unbounded()).avg_price;
        let result = WhatIfResult::new(predicted_price, market_average);

        info!(
            predicted_price,
            market_average,
            latency_ms = elapsed.as_millis() as u64,
            "Price estimate completed"
        );

        Ok(result)
    }
}
