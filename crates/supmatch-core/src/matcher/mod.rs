//! Page matchers: decide whether a supplier name occurs on an invoice page.
//!
//! All matchers compare words by exact, case-sensitive equality.
//! - [`LinearMatcher`] scans the sorted words once per name.
//! - [`PositionalMatcher`] gives the same answer using the position index.
//! - [`AdjacencyMatcher`] also requires consecutive name words to sit on the
//!   same or the next line.

mod adjacency;
mod linear;
mod positional;

pub use adjacency::AdjacencyMatcher;
pub use linear::LinearMatcher;
pub use positional::PositionalMatcher;

use serde::{Deserialize, Serialize};

use crate::layout::Page;

/// Trait for name-on-page matchers.
pub trait PageMatcher: Send + Sync {
    /// Whether the ordered name words occur on the page.
    fn matches(&self, name: &[&str], page: &Page) -> bool;

    /// Short identifier used in logs.
    fn name(&self) -> &'static str;
}

/// Selectable matcher implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatcherKind {
    /// Linear subsequence scan.
    Linear,
    /// Position-index subsequence lookup.
    #[default]
    Positional,
    /// Line-adjacency recursive match.
    Adjacency,
}

static LINEAR: LinearMatcher = LinearMatcher;
static POSITIONAL: PositionalMatcher = PositionalMatcher;
static ADJACENCY: AdjacencyMatcher = AdjacencyMatcher;

impl MatcherKind {
    /// The matcher implementation for this kind.
    pub fn matcher(self) -> &'static dyn PageMatcher {
        match self {
            MatcherKind::Linear => &LINEAR,
            MatcherKind::Positional => &POSITIONAL,
            MatcherKind::Adjacency => &ADJACENCY,
        }
    }
}

impl std::fmt::Display for MatcherKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.matcher().name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Word;

    fn page(words: &[(&str, u32, u32)]) -> Page {
        let mut page = Page::with_words(
            0,
            words
                .iter()
                .map(|&(text, line, pos)| Word::new(text, 0, line, pos))
                .collect(),
        );
        page.prepare();
        page
    }

    const KINDS: [MatcherKind; 3] = [
        MatcherKind::Linear,
        MatcherKind::Positional,
        MatcherKind::Adjacency,
    ];

    #[test]
    fn test_empty_name_never_matches() {
        let page = page(&[("Demo", 0, 0)]);
        for kind in KINDS {
            assert!(!kind.matcher().matches(&[], &page), "{kind}");
        }
    }

    #[test]
    fn test_empty_page_never_matches() {
        let page = page(&[]);
        for kind in KINDS {
            assert!(!kind.matcher().matches(&["Demo", "Company"], &page), "{kind}");
        }
    }

    #[test]
    fn test_linear_and_positional_agree() {
        let layouts: Vec<Page> = vec![
            page(&[("Demo", 0, 0), ("Company", 0, 1)]),
            page(&[("Company", 0, 0), ("Demo", 0, 1)]),
            page(&[("Demo", 0, 0), ("x", 3, 0), ("Demo", 5, 1), ("Company", 9, 2)]),
            page(&[("Demo", 0, 0), ("Demo", 0, 1)]),
            page(&[("a", 0, 0), ("b", 0, 1), ("a", 1, 0), ("c", 1, 1), ("b", 2, 0)]),
        ];
        let names: Vec<Vec<&str>> = vec![
            vec!["Demo", "Company"],
            vec!["Demo", "Demo"],
            vec!["Demo", "Demo", "Demo"],
            vec!["a", "b", "c"],
            vec!["a", "c", "b"],
            vec!["c", "a"],
            vec!["Company"],
        ];

        for page in &layouts {
            for name in &names {
                assert_eq!(
                    LINEAR.matches(name, page),
                    POSITIONAL.matches(name, page),
                    "name {name:?} on {:?}",
                    page.words()
                );
            }
        }
    }

    #[test]
    fn test_adjacency_refines_positional() {
        let layouts: Vec<Page> = vec![
            page(&[("Demo", 0, 0), ("Company", 20, 0)]),
            page(&[("Demo", 3, 2), ("invoice", 3, 3), ("Company", 4, 1)]),
            page(&[("Demo", 0, 0), ("Demo", 19, 0), ("Company", 20, 0)]),
            page(&[("Company", 0, 0), ("Demo", 0, 1)]),
            page(&[("a", 0, 0), ("b", 1, 0), ("c", 3, 0), ("c", 2, 5)]),
        ];
        let names: Vec<Vec<&str>> = vec![
            vec!["Demo", "Company"],
            vec!["a", "b", "c"],
            vec!["Company", "Demo"],
        ];

        for page in &layouts {
            for name in &names {
                if ADJACENCY.matches(name, page) {
                    assert!(POSITIONAL.matches(name, page), "name {name:?}");
                }
            }
        }
    }

    #[test]
    fn test_kind_serde_names() {
        assert_eq!(serde_json::to_string(&MatcherKind::Adjacency).unwrap(), "\"adjacency\"");
        let kind: MatcherKind = serde_json::from_str("\"linear\"").unwrap();
        assert_eq!(kind, MatcherKind::Linear);
        assert_eq!(MatcherKind::Positional.to_string(), "positional");
    }
}
