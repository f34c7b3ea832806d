use super::PageMatcher;
use crate::layout::Page;
use crate::models::Placement;

/// Ordered match where each name word must follow the previous one in
/// reading order and sit on the same line or the next one.
///
/// Backtracks over every admissible occurrence of each word, so the cost
/// grows with repeated early words; supplier names are short enough that
/// recursion depth stays small.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdjacencyMatcher;

impl AdjacencyMatcher {
    fn match_from(name: &[&str], page: &Page, previous: Option<Placement>) -> bool {
        let Some((token, rest)) = name.split_first() else {
            return true;
        };
        let Some(placements) = page.placements(token) else {
            return false;
        };

        let start = match previous {
            Some(prev) => placements.partition_point(|p| *p <= prev),
            None => 0,
        };

        for candidate in &placements[start..] {
            if let Some(prev) = previous {
                // sorted by line, nothing further can be close enough
                if !prev.reaches(candidate) {
                    break;
                }
            }
            if Self::match_from(rest, page, Some(*candidate)) {
                return true;
            }
        }
        false
    }
}

impl PageMatcher for AdjacencyMatcher {
    fn matches(&self, name: &[&str], page: &Page) -> bool {
        if name.is_empty() || !page.has_adjacency_index() {
            return false;
        }
        Self::match_from(name, page, None)
    }

    fn name(&self) -> &'static str {
        "adjacency"
    }
}
