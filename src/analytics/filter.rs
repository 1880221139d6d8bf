use crate::models::{FilterCriteria, PropertyRecord};

/// Records satisfying every bound in `criteria`, in their original order.
///
/// Contradictory bounds (min above max) simply match nothing.
pub fn filter(records: &[PropertyRecord], criteria: &FilterCriteria) -> Vec<PropertyRecord> {
    records
        .iter()
        .filter(|record| criteria.matches(record))
        .copied()
        .collect()
}
