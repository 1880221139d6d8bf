use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::debug;

use super::{
    extract::{AppJson, AppQuery},
    validation::{validate_what_if, FilterQuery},
    AppState,
};
use crate::{
    error::AppError,
    models::{FilterCriteria, GroupedStatistic, MarketSummary, PropertyRecord, WhatIfInput, WhatIfResult},
};

/// GET /market/health
pub async fn health() -> &'static str {
    "ok"
}

/// GET /market/summary
pub async fn summary(State(state): State<AppState>) -> Json<MarketSummary> {
    Json(state.cache.summary(&FilterCriteria::unbounded()))
}

/// GET /market/segments
pub async fn segments(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<FilterQuery>,
) -> Result<Json<Arc<[PropertyRecord]>>, AppError> {
    let criteria = query.into_criteria()?;
    let records = state.cache.segments(&criteria);
    debug!(matched = records.len(), "Serving market segment");
    Ok(Json(records))
}

/// GET /market/distribution/bedrooms
pub async fn bedroom_distribution(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<FilterQuery>,
) -> Result<Json<Arc<[GroupedStatistic]>>, AppError> {
    let criteria = query.into_criteria()?;
    Ok(Json(state.cache.bedroom_distribution(&criteria)))
}

/// POST /market/what-if
pub async fn what_if(
    State(state): State<AppState>,
    AppJson(input): AppJson<WhatIfInput>,
) -> Result<Json<WhatIfResult>, AppError> {
    validate_what_if(&input)?;
    let result = state.estimator.estimate(&input).await?;
    Ok(Json(result))
}
