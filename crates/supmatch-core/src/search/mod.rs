//! Supplier search over an invoice layout.
//!
//! A search moves through `Loading -> Indexed -> Searching` and ends in
//! `Found` or `NotFound`. Not finding a supplier is a normal outcome, not an
//! error.

mod exhaustive;
mod selective;
mod signal;

pub use exhaustive::ExhaustiveSearch;
pub use selective::{PageCandidates, SelectiveSearch, evaluate};
pub use signal::StopSignal;

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::{CatalogIndex, CatalogReader, FlattenedCatalog};
use crate::error::Result;
use crate::invoice::load_invoice;
use crate::layout::InvoiceLayout;
use crate::models::{Supplier, SupmatchConfig};

/// How the catalog is consulted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Stream every catalog entry through a worker pool.
    #[default]
    Exhaustive,
    /// Fetch only entries whose leading word occurs on the invoice.
    Selective,
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchMode::Exhaustive => write!(f, "exhaustive"),
            SearchMode::Selective => write!(f, "selective"),
        }
    }
}

/// Lifecycle of one search invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    Idle,
    Loading,
    Indexed,
    Searching,
    Found,
    NotFound,
}

/// Terminal result of a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "supplier", rename_all = "snake_case")]
pub enum SearchOutcome {
    Found(Supplier),
    NotFound,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    /// The matched supplier, if any.
    pub fn supplier(&self) -> Option<&Supplier> {
        match self {
            SearchOutcome::Found(supplier) => Some(supplier),
            SearchOutcome::NotFound => None,
        }
    }

    pub fn phase(&self) -> SearchPhase {
        match self {
            SearchOutcome::Found(_) => SearchPhase::Found,
            SearchOutcome::NotFound => SearchPhase::NotFound,
        }
    }
}

/// Outcome of a scan plus the number of catalog entries tested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scan {
    pub outcome: SearchOutcome,
    pub candidates: usize,
}

/// Result of a complete search invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchReport {
    /// Matched supplier or not found.
    pub outcome: SearchOutcome,

    /// Mode the search ran in.
    pub mode: SearchMode,

    /// Phase the search ended in, `found` or `not_found`.
    pub phase: SearchPhase,

    /// Number of invoice pages.
    pub pages: usize,

    /// Number of invoice words.
    pub words: usize,

    /// Catalog entries tested against the invoice.
    pub candidates: usize,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Runs searches according to a configuration.
#[derive(Debug, Clone)]
pub struct SupplierSearch {
    config: SupmatchConfig,
}

impl SupplierSearch {
    /// Create a search; invalid configuration is rejected here, before any I/O.
    pub fn new(config: SupmatchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SupmatchConfig {
        &self.config
    }

    /// Search the invoice token dump at `invoice` for a supplier from `catalog`.
    ///
    /// In selective mode `catalog` names the plain catalog file; its index
    /// artifacts are located next to it.
    pub async fn run(&self, invoice: &Path, catalog: &Path) -> Result<SearchReport> {
        let start = Instant::now();
        let mode = self.config.search.mode;
        let mut phase = SearchPhase::Idle;

        advance(&mut phase, SearchPhase::Loading);
        let words = load_invoice(invoice)?;
        let layout = InvoiceLayout::from_words(words);
        let (pages, word_count) = (layout.pages().len(), layout.word_count());
        advance(&mut phase, SearchPhase::Indexed);

        let scan = match mode {
            SearchMode::Exhaustive => {
                let reader = CatalogReader::open(catalog)?;
                let search = ExhaustiveSearch::from_config(&self.config.search)?;
                advance(&mut phase, SearchPhase::Searching);
                search.run(Arc::new(layout), reader).await?
            }
            SearchMode::Selective => {
                let index_config = &self.config.index;
                let index = CatalogIndex::load(&index_config.offsets_path(catalog))?;
                let mut flattened = FlattenedCatalog::open(&index_config.flattened_path(catalog))?;
                advance(&mut phase, SearchPhase::Searching);
                SelectiveSearch::new(&index, &mut flattened)
                    .with_full_groups(index_config.read_full_group)
                    .run(&layout)?
            }
        };
        advance(&mut phase, scan.outcome.phase());

        match &scan.outcome {
            SearchOutcome::Found(supplier) => info!("supplier name found: {}", supplier),
            SearchOutcome::NotFound => info!("supplier name not found"),
        }

        Ok(SearchReport {
            outcome: scan.outcome,
            mode,
            phase,
            pages,
            words: word_count,
            candidates: scan.candidates,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}

fn advance(phase: &mut SearchPhase, next: SearchPhase) {
    debug!("Search phase {:?} -> {:?}", phase, next);
    *phase = next;
}
