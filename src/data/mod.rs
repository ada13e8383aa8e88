/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  data/<name>.parquet / .csv
///        │
///        ▼
///   ┌───────────┐
///   │  loader    │  resolve + parse file → Table, memoized per name
///   └───────────┘
///        │
///        ▼
///   ┌───────────┐
///   │  Table     │  Vec<Row>, column order, unique-value index
///   └───────────┘
///        │
///        ▼
///   ┌───────────┐
///   │  filter    │  year selection → filtered Table
///   └───────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  sums / top-N / group-bys → chart-ready views
///   └───────────┘
/// ```
pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
