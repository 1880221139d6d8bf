//! Pure query functions over property records
//!
//! Nothing here touches shared state; the [`crate::cache`] module layers
//! memoization on top.

pub mod aggregate;
pub mod filter;

pub use aggregate::{group_by_bedrooms, summarize};
pub use filter::filter;
