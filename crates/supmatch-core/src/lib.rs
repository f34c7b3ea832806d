//! Core library for finding a known supplier name on an OCR'd invoice.
//!
//! This crate provides:
//! - Invoice token layout (pages sorted into reading order, per-page indexes)
//! - Three page matchers: linear, positional and line-adjacency
//! - A persisted leading-word index over the supplier catalog
//! - Exhaustive (worker pool) and selective (index-filtered) search

pub mod catalog;
pub mod error;
pub mod invoice;
pub mod layout;
pub mod matcher;
pub mod models;
pub mod patterns;
pub mod search;

pub use catalog::{CatalogIndex, CatalogReader, FlattenedCatalog, IndexStats};
pub use error::{IndexError, ParseError, Result, SupmatchError};
pub use layout::{InvoiceLayout, Page, group_words};
pub use matcher::{AdjacencyMatcher, LinearMatcher, MatcherKind, PageMatcher, PositionalMatcher};
pub use models::{Supplier, SupmatchConfig, Word};
pub use search::{
    ExhaustiveSearch, SearchMode, SearchOutcome, SearchPhase, SearchReport, SelectiveSearch,
    SupplierSearch,
};
