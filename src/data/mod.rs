/// Data layer: region mapping, records, loading, and per-year filtering.
///
/// Architecture:
/// ```text
///  dataset_final_tratado.csv  (';'-separated, decimal commas)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + clean numbers → Dataset
///   └──────────┘
///        │  region::classify_region(Estado)
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Record>, each with Regiao / Regiao_Cod
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  rows for the selected year, means, ranking
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod region;
