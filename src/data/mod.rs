/// Data layer: core types, loading, filtering and derived values.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet        synthetic generator
///        │                               │
///        ▼                               ▼
///   ┌──────────┐                   ┌──────────┐
///   │  loader   │                   │  sample   │
///   └──────────┘                   └──────────┘
///        └───────────┬───────────────────┘
///                    ▼
///             ┌──────────────┐
///             │   Dataset     │  Arc<[Record]>, loaded once
///             └──────────────┘
///                    │
///                    ▼
///   ┌──────────┐   ┌──────────┐
///   │  memo     │──▶│  filter   │  selection → FilteredView (indices)
///   └──────────┘   └──────────┘
///                    │
///        ┌───────────┼────────────┐
///        ▼           ▼            ▼
///     stats      histogram       grid
/// ```

pub mod filter;
pub mod grid;
pub mod histogram;
pub mod loader;
pub mod memo;
pub mod model;
pub mod sample;
pub mod source;
pub mod stats;
