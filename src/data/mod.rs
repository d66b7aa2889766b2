/// Data layer: core types, loading, filtering, and reporting.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → OrderDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ OrderDataset  │  Vec<Order>, column presence, value bounds
///   └──────────────┘
///        │
///        ├──────────────────────┐
///        ▼                      ▼
///   ┌──────────┐          ┌──────────┐
///   │  filter   │          │  report   │  summary, top combos/customers,
///   └──────────┘          └──────────┘  category counts, histogram
///     value-range → indices
/// ```
pub mod filter;
pub mod loader;
pub mod model;
pub mod report;
