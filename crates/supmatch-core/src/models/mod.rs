//! Data models shared across the layout, catalog and search modules.

pub mod config;
pub mod supplier;
pub mod word;

pub use config::{IndexConfig, SearchConfig, SupmatchConfig};
pub use supplier::Supplier;
pub use word::{Placement, Word};
