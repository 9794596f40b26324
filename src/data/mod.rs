/// Data layer: core types, loading, filtering and the chart queries.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset  (fallback table on failure)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<LaunchRecord>, site options, payload bounds
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  site / payload predicates → matching indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  query    │  PieResult (success counts), ScatterResult (records)
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod query;

pub use filter::{FilterParams, PayloadRange, SiteFilter};
pub use loader::{load, try_load, Loaded};
pub use model::{Dataset, LaunchRecord, Outcome};
pub use query::{
    compute_filtered_records, compute_success_distribution, compute_success_distribution_with,
    PieResult, ScatterResult, ZeroGroups,
};
