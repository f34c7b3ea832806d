//! Selective search: fetch only catalog groups keyed by words on the invoice.

use std::collections::HashMap;
use std::io::{Read, Seek};

use tracing::debug;

use super::{Scan, SearchOutcome};
use crate::catalog::{CatalogIndex, FlattenedCatalog};
use crate::error::Result;
use crate::layout::InvoiceLayout;
use crate::matcher::{AdjacencyMatcher, PageMatcher};
use crate::models::Supplier;

/// Suppliers whose leading word appears on one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCandidates {
    /// Index of the page in the layout.
    pub page: usize,
    /// Candidates in the order their leading words were met on the page.
    pub suppliers: Vec<Supplier>,
}

/// Index-driven single-threaded search.
pub struct SelectiveSearch<'a, R> {
    index: &'a CatalogIndex,
    catalog: &'a mut FlattenedCatalog<R>,
    read_full_group: bool,
}

impl<'a, R: Read + Seek> SelectiveSearch<'a, R> {
    pub fn new(index: &'a CatalogIndex, catalog: &'a mut FlattenedCatalog<R>) -> Self {
        Self {
            index,
            catalog,
            read_full_group: true,
        }
    }

    /// When disabled, only the first line of each indexed group is read.
    pub fn with_full_groups(mut self, read_full_group: bool) -> Self {
        self.read_full_group = read_full_group;
        self
    }

    /// Look up every distinct word of every page and gather the matching groups.
    ///
    /// Pages without any index hit are omitted.
    pub fn collect_candidates(&mut self, layout: &InvoiceLayout) -> Result<Vec<PageCandidates>> {
        let mut groups: HashMap<u64, Vec<Supplier>> = HashMap::new();
        let mut collected = Vec::new();

        for (page_idx, page) in layout.pages().iter().enumerate() {
            let mut suppliers = Vec::new();
            for text in page.distinct_texts() {
                let Some(offset) = self.index.lookup(text) else {
                    continue;
                };
                if !groups.contains_key(&offset) {
                    let group = if self.read_full_group {
                        self.catalog.read_group_at(offset, text)?
                    } else {
                        vec![self.catalog.read_entry_at(offset)?]
                    };
                    debug!("Index hit '{}' at {} ({} suppliers)", text, offset, group.len());
                    groups.insert(offset, group);
                }
                suppliers.extend(groups[&offset].iter().cloned());
            }

            if !suppliers.is_empty() {
                collected.push(PageCandidates {
                    page: page_idx,
                    suppliers,
                });
            }
        }

        Ok(collected)
    }

    /// Find the first candidate that matches its page under line adjacency.
    pub fn run(&mut self, layout: &InvoiceLayout) -> Result<Scan> {
        let candidates = self.collect_candidates(layout)?;
        Ok(evaluate(layout, candidates, &AdjacencyMatcher))
    }
}

/// Try candidates page by page, in collection order, stopping at the first match.
///
/// Candidates naming a page the layout does not have are skipped.
pub fn evaluate(
    layout: &InvoiceLayout,
    candidates: Vec<PageCandidates>,
    matcher: &dyn PageMatcher,
) -> Scan {
    let mut evaluated = 0;
    for PageCandidates { page, suppliers } in candidates {
        let Some(page) = layout.pages().get(page) else {
            debug!("Skipping candidates for missing page {}", page);
            continue;
        };
        for supplier in suppliers {
            evaluated += 1;
            if matcher.matches(&supplier.name_tokens(), page) {
                debug!("Matched supplier {} on page {}", supplier, page.id());
                return Scan {
                    outcome: SearchOutcome::Found(supplier),
                    candidates: evaluated,
                };
            }
        }
    }

    Scan {
        outcome: SearchOutcome::NotFound,
        candidates: evaluated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Word;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn indexed(suppliers: &[(&str, &str)]) -> (CatalogIndex, FlattenedCatalog<Cursor<Vec<u8>>>) {
        let mut flattened = Vec::new();
        let (index, _) = CatalogIndex::build(
            suppliers.iter().map(|(id, name)| Ok(Supplier::new(*id, *name))),
            &mut flattened,
        )
        .unwrap();
        (index, FlattenedCatalog::new(Cursor::new(flattened)))
    }

    fn sample_layout() -> InvoiceLayout {
        InvoiceLayout::from_words(vec![
            Word::new("INVOICE", 1, 0, 1),
            Word::new("Demo", 1, 4, 0),
            Word::new("Company", 1, 4, 1),
        ])
    }

    #[test]
    fn test_finds_supplier_through_index() {
        let (index, mut catalog) = indexed(&[("9", "Acme Corp"), ("123", "Demo Company")]);
        let scan = SelectiveSearch::new(&index, &mut catalog)
            .run(&sample_layout())
            .unwrap();

        assert_eq!(
            scan.outcome,
            SearchOutcome::Found(Supplier::new("123", "Demo Company"))
        );
        assert_eq!(scan.candidates, 1);
    }

    #[test]
    fn test_full_group_reaches_later_entries() {
        let (index, mut catalog) = indexed(&[
            ("1", "Demo Trading"),
            ("2", "Demo Company"),
            ("3", "Zeta"),
        ]);

        let scan = SelectiveSearch::new(&index, &mut catalog)
            .run(&sample_layout())
            .unwrap();
        assert_eq!(scan.outcome.supplier().map(|s| s.id.as_str()), Some("2"));

        let scan = SelectiveSearch::new(&index, &mut catalog)
            .with_full_groups(false)
            .run(&sample_layout())
            .unwrap();
        assert_eq!(scan.outcome, SearchOutcome::NotFound);
    }

    #[test]
    fn test_candidates_follow_pages() {
        let layout = InvoiceLayout::from_words(vec![
            Word::new("Acme", 2, 0, 0),
            Word::new("Demo", 1, 4, 0),
            Word::new("Demo", 2, 1, 0),
            Word::new("Total", 1, 9, 0),
        ]);
        let (index, mut catalog) = indexed(&[("1", "Demo Company"), ("2", "Acme Corp")]);

        let candidates = SelectiveSearch::new(&index, &mut catalog)
            .collect_candidates(&layout)
            .unwrap();

        assert_eq!(
            candidates,
            vec![
                PageCandidates {
                    page: 0,
                    suppliers: vec![
                        Supplier::new("2", "Acme Corp"),
                        Supplier::new("1", "Demo Company"),
                    ],
                },
                PageCandidates {
                    page: 1,
                    suppliers: vec![Supplier::new("1", "Demo Company")],
                },
            ]
        );
    }

    #[test]
    fn test_words_split_across_pages() {
        let layout = InvoiceLayout::from_words(vec![
            Word::new("INVOICE", 1, 0, 1),
            Word::new("Demo", 2, 4, 0),
            Word::new("Company", 1, 4, 1),
        ]);
        let (index, mut catalog) = indexed(&[("123", "Demo Company")]);

        let scan = SelectiveSearch::new(&index, &mut catalog).run(&layout).unwrap();
        assert_eq!(scan.outcome, SearchOutcome::NotFound);
        assert_eq!(scan.candidates, 1);
    }

    #[test]
    fn test_line_skip_rejected() {
        let layout = InvoiceLayout::from_words(vec![
            Word::new("Demo", 1, 0, 0),
            Word::new("Company", 1, 20, 0),
        ]);
        let (index, mut catalog) = indexed(&[("123", "Demo Company")]);

        let scan = SelectiveSearch::new(&index, &mut catalog).run(&layout).unwrap();
        assert!(!scan.outcome.is_found());
    }

    #[test]
    fn test_evaluate_skips_unknown_page() {
        let candidates = vec![
            PageCandidates {
                page: 7,
                suppliers: vec![Supplier::new("9", "Demo Company")],
            },
            PageCandidates {
                page: 0,
                suppliers: vec![Supplier::new("123", "Demo Company")],
            },
        ];

        let scan = evaluate(&sample_layout(), candidates, &AdjacencyMatcher);
        assert_eq!(scan.outcome.supplier().map(|s| s.id.as_str()), Some("123"));
        assert_eq!(scan.candidates, 1);
    }

    #[test]
    fn test_no_index_hits() {
        let (index, mut catalog) = indexed(&[("5", "Zeta")]);
        let scan = SelectiveSearch::new(&index, &mut catalog)
            .run(&sample_layout())
            .unwrap();
        assert_eq!(scan.outcome, SearchOutcome::NotFound);
        assert_eq!(scan.candidates, 0);
    }
}
