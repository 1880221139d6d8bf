use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use super::{extract::AppQuery, AppState};
use crate::{error::AppError, export::render_csv};

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(rename = "type")]
    pub format: String,
}

/// GET /market/export?type=csv
///
/// Streams the full dataset in load order as a CSV attachment.
pub async fn export(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ExportQuery>,
) -> Result<Response, AppError> {
    if !query.format.eq_ignore_ascii_case("csv") {
        return Err(AppError::UnsupportedExport(query.format));
    }

    let body = render_csv(state.dataset.records())?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=market_data.csv",
            ),
        ],
        body,
    )
        .into_response())
}
