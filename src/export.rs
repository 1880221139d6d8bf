use crate::models::PropertyRecord;

/// Render records as CSV with a camelCase header row, in the given order.
pub fn render_csv(records: &[PropertyRecord]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if records.is_empty() {
        // serialize() only emits the header alongside the first record
        writer.write_record(HEADER)?;
    }
    for record in records {
        writer.serialize(record)?;
    }
    writer.into_inner().map_err(|e| e.into_error().into())
}

const HEADER: [&str; 8] = [
    "price",
    "squareFootage",
    "bedrooms",
    "bathrooms",
    "yearBuilt",
    "lotSize",
    "distanceToCityCenter",
    "schoolRating",
];
