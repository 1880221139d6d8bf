//! The immutable in-memory housing dataset
//!
//! Built once at startup by [`loader`] and shared read-only (behind an `Arc`)
//! by every query path. Nothing mutates it after load, so readers need no
//! synchronization.

pub mod loader;

pub use loader::{load_path, load_reader, LoadError};

use crate::models::PropertyRecord;

/// Ordered property records, in source row order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<PropertyRecord>,
}

impl Dataset {
    pub fn new(records: Vec<PropertyRecord>) -> Self {
        Self { records }
    }

    /// Full ordered record list (read-only)
    pub fn records(&self) -> &[PropertyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
