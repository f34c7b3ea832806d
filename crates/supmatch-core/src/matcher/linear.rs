use super::PageMatcher;
use crate::layout::Page;

/// Subsequence match by scanning the page's sorted words once.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearMatcher;

impl PageMatcher for LinearMatcher {
    fn matches(&self, name: &[&str], page: &Page) -> bool {
        if name.is_empty() || page.is_empty() {
            return false;
        }

        let mut remaining = name.iter().peekable();
        for word in page.words() {
            match remaining.peek() {
                Some(next) if **next == word.text => {
                    remaining.next();
                }
                Some(_) => {}
                None => break,
            }
        }
        remaining.peek().is_none()
    }

    fn name(&self) -> &'static str {
        "linear"
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
        page.sort();
        page
    }

    #[test]
    fn test_match_in_same_line() {
        let page = page(&[("Demo", 0, 0), ("Company", 0, 1)]);
        assert!(LinearMatcher.matches(&["Demo", "Company"], &page));
    }

    #[test]
    fn test_match_in_different_line() {
        let page = page(&[("Demo", 0, 0), ("Company", 1, 0)]);
        assert!(LinearMatcher.matches(&["Demo", "Company"], &page));
    }

    #[test]
    fn test_not_match() {
        let page = page(&[("Demo", 0, 0), ("AnotherCompany", 1, 0)]);
        assert!(!LinearMatcher.matches(&["Demo", "Company"], &page));
    }

    #[test]
    fn test_order_matters() {
        let page = page(&[("Company", 0, 0), ("Demo", 0, 1)]);
        assert!(!LinearMatcher.matches(&["Demo", "Company"], &page));
    }

    #[test]
    fn test_case_sensitive() {
        let page = page(&[("demo", 0, 0), ("company", 0, 1)]);
        assert!(!LinearMatcher.matches(&["Demo", "Company"], &page));
    }

    #[test]
    fn test_empty_supplier_name() {
        let page = page(&[("Demo", 0, 0), ("AnotherCompany", 1, 0)]);
        assert!(!LinearMatcher.matches(&[], &page));
    }

    #[test]
    fn test_empty_page() {
        assert!(!LinearMatcher.matches(&["Demo", "Company"], &Page::new(0)));
    }
}
