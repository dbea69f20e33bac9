/// Data layer: play records, loading, cleaning, filtering and aggregation.
///
/// Architecture:
/// ```text
///  play_by_play_<season>.parquet / .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read needed columns → PlayTable
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ base_filter  │  real passes, passers with enough plays (once)
///   └─────────────┘
///        │
///        ▼
///   ┌───────────┐      ┌──────────┐
///   │ selection  │ ───▶ │  filter   │  widget choices → FilterSpec
///   └───────────┘      └──────────┘
///                            │
///                            ▼
///                      ┌───────────┐
///                      │ aggregate  │  filter + group → Aggregation
///                      └───────────┘
/// ```

pub mod aggregate;
pub mod base_filter;
pub mod filter;
pub mod loader;
pub mod model;
pub mod options;
pub mod selection;
