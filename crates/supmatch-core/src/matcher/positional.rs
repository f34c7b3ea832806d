use super::PageMatcher;
use crate::layout::Page;

/// Subsequence match through the page's text -> positions index.
///
/// For each name word, binary-search its occurrence list for the first
/// position after the previously matched one.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalMatcher;

impl PageMatcher for PositionalMatcher {
    fn matches(&self, name: &[&str], page: &Page) -> bool {
        if name.is_empty() || !page.has_position_index() {
            return false;
        }

        // first position still available to the next name word
        let mut next_free = 0usize;
        for token in name {
            let Some(positions) = page.positions(token) else {
                return false;
            };
            let found = positions.partition_point(|&p| p < next_free);
            match positions.get(found) {
                Some(&position) => next_free = position + 1,
                None => return false,
            }
        }
        true
    }

    fn name(&self) -> &'static str {
        "positional"
    }
}
