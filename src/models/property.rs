use serde::{Deserialize, Serialize};

/// A single property listing from the housing dataset
///
/// Field order matches the CSV export column order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    /// Sale price
    pub price: f64,
    /// Interior area in square feet
    pub square_footage: f64,
    pub bedrooms: i32,
    pub bathrooms: f64,
    pub year_built: i32,
    /// Lot area in square feet
    pub lot_size: f64,
    /// Distance to the city center in miles
    pub distance_to_city_center: f64,
    /// School rating on a 0-10 scale
    pub school_rating: f64,
}

#[cfg(test)]
pub(crate) fn sample(price: f64, bedrooms: i32, school_rating: f64) -> PropertyRecord {
    PropertyRecord {
        price,
        square_footage: 1500.0,
        bedrooms,
        bathrooms: 2.0,
        year_built: 2000,
        lot_size: 4000.0,
        distance_to_city_center: 5.0,
        school_rating,
    }
}
