use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::{EstimationError, PricePredictor};
use crate::models::WhatIfInput;

/// Outbound body: `{"features": {...}}`
#[derive(Debug, Serialize)]
struct PredictRequest {
    features: Features,
}

/// Feature vector in the estimator's snake_case naming
#[derive(Debug, Serialize)]
struct Features {
    square_footage: f64,
    bedrooms: i32,
    bathrooms: f64,
    year_built: i32,
    lot_size: f64,
    distance_to_city_center: f64,
    school_rating: f64,
}

impl From<&WhatIfInput> for PredictRequest {
    fn from(input: &WhatIfInput) -> Self {
        Self {
            features: Features {
                square_footage: input.square_footage,
                bedrooms: input.bedrooms,
                bathrooms: input.bathrooms,
                year_built: input.year_built,
                lot_size: input.lot_size,
                distance_to_city_center: input.distance_to_city_center,
                school_rating: input.school_rating,
            },
        }
    }
}

/// [`PricePredictor`] backed by an HTTP prediction endpoint
pub struct HttpPricePredictor {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpPricePredictor {
    pub fn new(client: Client, endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        }
    }
}

#[async_trait]
impl PricePredictor for HttpPricePredictor {
    async fn predict(&self, input: &WhatIfInput) -> Result<f64, EstimationError> {
        debug!(endpoint = %self.endpoint, "Requesting price prediction");

        let response = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(&PredictRequest::from(input))
            .send()
            .await
            .map_err(|e| EstimationError::ServiceUnavailable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| EstimationError::ServiceUnavailable(e.to_string()))?;

        if !status.is_success() {
            return Err(EstimationError::UpstreamError {
                status,
                message: body,
            });
        }

        parse_prediction(status, &body)
    }
}

/// Extract `predictions[0]` from a successful response body
fn parse_prediction(status: StatusCode, body: &str) -> Result<f64, EstimationError> {
    let missing_body = || EstimationError::UpstreamError {
        status,
        message: "empty response body".to_string(),
    };

    if body.trim().is_empty() {
        return Err(missing_body());
    }

    let json: Value = serde_json::from_str(body)
        .map_err(|e| EstimationError::InvalidResponse(format!("body is not valid JSON: {}", e)))?;
    if json.is_null() {
        return Err(missing_body());
    }

    let predictions = json
        .get("predictions")
        .ok_or_else(|| EstimationError::InvalidResponse("missing 'predictions' field".to_string()))?
        .as_array()
        .ok_or_else(|| EstimationError::InvalidResponse("'predictions' is not an array".to_string()))?;

    let first = predictions
        .first()
        .ok_or_else(|| EstimationError::InvalidResponse("'predictions' is empty".to_string()))?;

    first.as_f64().ok_or_else(|| {
        EstimationError::InvalidResponse(format!("first prediction is not numeric: {}", first))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn sample_input() -> WhatIfInput {
        WhatIfInput {
            square_footage: 1500.0,
            bedrooms: 3,
            bathrooms: 2.0,
            year_built: 2005,
            lot_size: 4000.0,
            distance_to_city_center: 5.0,
            school_rating: 8.0,
        }
    }

    fn parse(body: &str) -> Result<f64, EstimationError> {
        parse_prediction(StatusCode::OK, body)
    }

    #[test]
    fn test_request_body_shape() {
        let input = WhatIfInput {
            square_footage: 1500.0,
            bedrooms: 3,
            bathrooms: 2.0,
            year_built: 2005,
            lot_size: 4000.0,
            distance_to_city_center: 5.0,
            school_rating: 8.0,
        };

        let json = serde_json::to_value(PredictRequest::from(&input)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "features": {
                    "square_footage": 1500.0,
                    "bedrooms": 3,
                    "bathrooms": 2.0,
                    "year_built": 2005,
                    "lot_size": 4000.0,
                    "distance_to_city_center": 5.0,
                    "school_rating": 8.0
                }
            })
        );
    }

    #[tokio::test]
    async fn test_timeout_is_service_unavailable() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"predictions": [250000]}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&mock_server)
            .await;

        let predictor = HttpPricePredictor::new(
            Client::new(),
            format!("{}/predict", mock_server.uri()),
            Duration::from_millis(200),
        );

        let err = predictor.predict(&sample_input()).await.unwrap_err();
        assert!(matches!(err, EstimationError::ServiceUnavailable(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_predict_round_trip_over_http() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"predictions": [312000.0]})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let predictor = HttpPricePredictor::new(
            Client::new(),
            format!("{}/predict", mock_server.uri()),
            Duration::from_secs(2),
        );

        assert_eq!(predictor.predict(&sample_input()).await.unwrap(), 312000.0);
    }

    #[test]
    fn test_parse_first_prediction() {
        assert_eq!(parse(r#"{"predictions":[250000]}"#).unwrap(), 250000.0);
        assert_eq!(parse(r#"{"predictions":[1.5, 2.5]}"#).unwrap(), 1.5);
    }

    #[test]
    fn test_parse_missing_or_empty_body() {
        assert!(matches!(parse(""), Err(EstimationError::UpstreamError { .. })));
        assert!(matches!(parse("  \n"), Err(EstimationError::UpstreamError { .. })));
        assert!(matches!(parse("null"), Err(EstimationError::UpstreamError { .. })));
    }

    #[test]
    fn test_parse_invalid_payloads() {
        for body in [
            r#"{"oops":true}"#,
            r#"{"predictions":[]}"#,
            r#"{"predictions":"250000"}"#,
            r#"{"predictions":["250000"]}"#,
            r#"{"predictions":[null]}"#,
            r#"[250000]"#,
            "not json",
        ] {
            let result = parse(body);
            assert!(
                matches!(result, Err(EstimationError::InvalidResponse(_))),
                "body {body:?} gave {result:?}"
            );
        }
    }
}
