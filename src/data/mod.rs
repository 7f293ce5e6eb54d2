//! Data layer: core types, loading, and aggregation.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → LaunchDataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────────┐
//!   │ LaunchDataset  │  Vec<LaunchRecord>, site list, payload bounds
//!   └───────────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ aggregate  │  (site, payload range) → outcome counts + rows in range
//!   └───────────┘
//! ```

pub mod aggregate;
pub mod loader;
pub mod model;
