//! Command implementations for the CLI
//!
//! - start: Load the dataset and serve the API
//! - test: Validate configuration and dry-load the dataset
//! - config: Configuration display and validation

pub mod config;
pub mod start;
pub mod test;
