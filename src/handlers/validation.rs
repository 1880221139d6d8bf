//! Input-bounds checks for inbound requests
//!
//! The analytics core trusts its inputs; everything range-related is checked
//! here before a request reaches it.

use serde::Deserialize;

use crate::{
    error::AppError,
    models::{FilterCriteria, WhatIfInput},
};

/// Optional filter bounds as they arrive on the query string
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterQuery {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_bedrooms: Option<i32>,
    pub max_bedrooms: Option<i32>,
    pub min_school_rating: Option<f64>,
    pub max_school_rating: Option<f64>,
}

impl FilterQuery {
    /// Check ranges and convert to criteria.
    ///
    /// A minimum above its maximum is accepted; it just matches nothing.
    pub fn into_criteria(self) -> Result<FilterCriteria, AppError> {
        for (name, value) in [("minPrice", self.min_price), ("maxPrice", self.max_price)] {
            if let Some(v) = value {
                non_negative(name, v)?;
            }
        }
        for (name, value) in [("minBedrooms", self.min_bedrooms), ("maxBedrooms", self.max_bedrooms)] {
            if let Some(v) = value {
                if v < 0 {
                    return Err(invalid(format!("{} must be >= 0", name)));
                }
            }
        }
        for (name, value) in [
            ("minSchoolRating", self.min_school_rating),
            ("maxSchoolRating", self.max_school_rating),
        ] {
            if let Some(v) = value {
                school_rating(name, v)?;
            }
        }

        Ok(FilterCriteria {
            min_price: self.min_price.into(),
            max_price: self.max_price.into(),
            min_bedrooms: self.min_bedrooms.into(),
            max_bedrooms: self.max_bedrooms.into(),
            min_school_rating: self.min_school_rating.into(),
            max_school_rating: self.max_school_rating.into(),
        })
    }
}

/// Check a what-if feature vector against accepted ranges
pub fn validate_what_if(input: &WhatIfInput) -> Result<(), AppError> {
    at_least("squareFootage", input.square_footage, 100.0)?;
    if input.bedrooms < 0 {
        return Err(invalid("bedrooms must be >= 0".to_string()));
    }
    non_negative("bathrooms", input.bathrooms)?;
    if input.year_built < 1800 {
        return Err(invalid("yearBuilt must be >= 1800".to_string()));
    }
    non_negative("lotSize", input.lot_size)?;
    non_negative("distanceToCityCenter", input.distance_to_city_center)?;
    school_rating("schoolRating", input.school_rating)?;
    Ok(())
}

fn invalid(message: String) -> AppError {
    AppError::ValidationError(message)
}

fn at_least(name: &str, value: f64, min: f64) -> Result<(), AppError> {
    if !value.is_finite() || value < min {
        return Err(invalid(format!("{} must be >= {}", name, min)));
    }
    Ok(())
}

fn non_negative(name: &str, value: f64) -> Result<(), AppError> {
    at_least(name, value, 0.0)
}

fn school_rating(name: &str, value: f64) -> Result<(), AppError> {
    if !value.is_finite() || !(0.0..=10.0).contains(&value) {
        return Err(invalid(format!("{} must be between 0 and 10", name)));
    }
    Ok(())
}
