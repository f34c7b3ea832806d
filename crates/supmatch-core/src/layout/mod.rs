//! Invoice token layout: words grouped into pages, sorted into reading order
//! and indexed for subsequence lookups.

mod page;

pub use page::Page;

use std::collections::HashMap;

use tracing::debug;

use crate::matcher::PageMatcher;
use crate::models::Word;

/// Partition words by page id, keeping pages in first-seen order and words in input order.
pub fn group_words(words: impl IntoIterator<Item = Word>) -> Vec<Page> {
    let mut pages: Vec<Page> = Vec::new();
    let mut slots: HashMap<u32, usize> = HashMap::new();

    for word in words {
        let slot = *slots.entry(word.page_id).or_insert_with(|| {
            pages.push(Page::new(word.page_id));
            pages.len() - 1
        });
        pages[slot].push(word);
    }

    pages
}

/// All pages of one invoice, sorted and fully indexed.
#[derive(Debug, Clone, Default)]
pub struct InvoiceLayout {
    pages: Vec<Page>,
}

impl InvoiceLayout {
    /// Group, sort and index the words of an invoice.
    pub fn from_words(words: impl IntoIterator<Item = Word>) -> Self {
        let mut pages = group_words(words);
        for page in &mut pages {
            page.prepare();
        }
        debug!("Built layout with {} pages", pages.len());
        Self { pages }
    }

    /// Pages in discovery order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Total number of words across all pages.
    pub fn word_count(&self) -> usize {
        self.pages.iter().map(Page::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// First page on which `matcher` finds the name.
    pub fn find_page(&self, name: &[&str], matcher: &dyn PageMatcher) -> Option<&Page> {
        self.pages.iter().find(|page| matcher.matches(name, page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn word(text: &str, page: u32, line: u32, pos: u32) -> Word {
        Word::new(text, page, line, pos)
    }

    #[test]
    fn test_group_same_page() {
        let words = vec![
            word("word1", 0, 0, 0),
            word("word2", 0, 1, 0),
            word("word3", 0, 0, 0),
        ];
        let pages = group_words(words.clone());

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].words(), &words[..]);
    }

    #[test]
    fn test_group_preserves_first_seen_page_order() {
        let pages = group_words(vec![
            word("word1", 3, 0, 0),
            word("word2", 1, 0, 0),
            word("word3", 3, 0, 1),
        ]);

        let ids: Vec<u32> = pages.iter().map(Page::id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(pages[0].words(), &[word("word1", 3, 0, 0), word("word3", 3, 0, 1)][..]);
        assert_eq!(pages[1].words(), &[word("word2", 1, 0, 0)][..]);
    }

    #[test]
    fn test_group_preserves_membership() {
        let words = vec![
            word("a", 2, 5, 1),
            word("b", 1, 0, 0),
            word("a", 2, 5, 1),
            word("c", 4, 2, 7),
            word("d", 1, 9, 9),
        ];
        let pages = group_words(words.clone());

        let mut regrouped: Vec<Word> = pages.iter().flat_map(|p| p.words().to_vec()).collect();
        let mut expected = words;
        regrouped.sort_by(|a, b| a.text.cmp(&b.text).then(a.page_id.cmp(&b.page_id)));
        expected.sort_by(|a, b| a.text.cmp(&b.text).then(a.page_id.cmp(&b.page_id)));
        assert_eq!(regrouped, expected);

        for page in &pages {
            assert!(page.words().iter().all(|w| w.page_id == page.id()));
        }
    }

    #[test]
    fn test_group_empty() {
        assert!(group_words(Vec::new()).is_empty());
    }

    #[test]
    fn test_layout_is_indexed() {
        let layout = InvoiceLayout::from_words(vec![
            word("Company", 1, 4, 1),
            word("INVOICE", 1, 0, 1),
            word("Demo", 1, 4, 0),
        ]);

        assert_eq!(layout.word_count(), 3);
        let page = &layout.pages()[0];
        assert!(page.is_sorted());
        assert_eq!(page.positions("Demo"), Some(&[1usize][..]));
        assert!(page.placements("Company").is_some());
    }
}
