//! Supplier catalog access: the flat catalog file and its leading-word index.

mod index;
mod reader;

pub use index::{CatalogIndex, FlattenedCatalog, IndexStats};
pub use reader::{CatalogReader, parse_supplier_line};
