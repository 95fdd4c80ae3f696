/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + clean rows → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<PlayerRecord>, player/year index
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply player + year predicates → view indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  summary metrics, grouped sums, pivot
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
