use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info};

use super::Dataset;
use crate::models::PropertyRecord;

/// id + 7 features + price
const MIN_FIELDS: usize = 9;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to open dataset {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read dataset: {0}")]
    Read(#[from] csv::Error),

    #[error("line {line}: invalid {column} value {value:?}")]
    Parse {
        line: u64,
        column: &'static str,
        value: String,
    },
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Load the dataset from a CSV file on disk.
pub fn load_path(path: &Path) -> Result<Dataset, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let dataset = load_reader(file)?;
    info!(
        path = %path.display(),
        records = dataset.len(),
        "Loaded property records"
    );
    Ok(dataset)
}

/// Load the dataset from any CSV byte source.
///
/// Layout: one header line (discarded), then rows of
/// `id, square_footage, bedrooms, bathrooms, year_built, lot_size,
/// distance_to_city_center, school_rating, price`.
///
/// Rows with fewer than nine fields are skipped. Any unparseable number in a
/// kept row fails the whole load; a partial dataset is never returned.
pub fn load_reader<R: Read>(reader: R) -> Result<Dataset, LoadError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for row in csv_reader.records() {
        let row = row?;
        if field_count(&row) < MIN_FIELDS {
            skipped += 1;
            continue;
        }
        records.push(parse_row(&row)?);
    }

    if skipped > 0 {
        debug!(skipped, "Skipped short dataset rows");
    }

    Ok(Dataset::new(records))
}

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

/// Number of fields, not counting trailing empty ones
/// (`"1,2,"` has two fields, as a plain comma split would report).
fn field_count(row: &StringRecord) -> usize {
    (0..row.len())
        .rev()
        .find(|&i| !row[i].is_empty())
        .map_or(0, |last| last + 1)
}

fn parse_row(row: &StringRecord) -> Result<PropertyRecord, LoadError> {
    let line = row.position().map_or(0, |p| p.line());

    Ok(PropertyRecord {
        square_footage: parse_float(row, line, 1, "square_footage")?,
        bedrooms: parse_field(row, line, 2, "bedrooms")?,
        bathrooms: parse_float(row, line, 3, "bathrooms")?,
        year_built: parse_field(row, line, 4, "year_built")?,
        lot_size: parse_float(row, line, 5, "lot_size")?,
        distance_to_city_center: parse_float(row, line, 6, "distance_to_city_center")?,
        school_rating: parse_float(row, line, 7, "school_rating")?,
        price: parse_float(row, line, 8, "price")?,
    })
}

fn parse_field<T: FromStr>(
    row: &StringRecord,
    line: u64,
    index: usize,
    column: &'static str,
) -> Result<T, LoadError> {
    let raw = row.get(index).unwrap_or_default();
    raw.parse().map_err(|_| LoadError::Parse {
        line,
        column,
        value: raw.to_string(),
    })
}

/// Like [`parse_field`], but `NaN` and infinities are rejected too
fn parse_float(
    row: &StringRecord,
    line: u64,
    index: usize,
    column: &'static str,
) -> Result<f64, LoadError> {
    let value: f64 = parse_field(row, line, index, column)?;
    if !value.is_finite() {
        return Err(LoadError::Parse {
            line,
            column,
            value: row.get(index).unwrap_or_default().to_string(),
        });
    }
    Ok(value)
}
