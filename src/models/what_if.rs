use serde::{Deserialize, Serialize};

/// Hypothetical property submitted for a price estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatIfInput {
    pub square_footage: f64,
    pub bedrooms: i32,
    pub bathrooms: f64,
    pub year_built: i32,
    pub lot_size: f64,
    pub distance_to_city_center: f64,
    pub school_rating: f64,
}

/// Predicted price compared against the market average
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatIfResult {
    pub predicted_price: f64,
    pub market_average: f64,
    pub difference_from_average: f64,
}

impl WhatIfResult {
    pub fn new(predicted_price: f64, market_average: f64) -> Self {
        Self {
            predicted_price,
            market_average,
            difference_from_average: predicted_price - market_average,
        }
    }
}
