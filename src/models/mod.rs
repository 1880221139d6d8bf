pub mod filter;
pub mod property;
pub mod stats;
pub mod what_if;

pub use filter::{Bound, FilterCriteria};
pub use property::PropertyRecord;
pub use stats::{GroupedStatistic, MarketSummary};
pub use what_if::{WhatIfInput, WhatIfResult};
