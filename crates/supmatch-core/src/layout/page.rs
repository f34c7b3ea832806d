//! A single invoice page and its lookup indexes.

use std::collections::{HashMap, HashSet};

use crate::models::{Placement, Word};

/// Words sharing one page id.
///
/// Once sorted, words are in reading order (line, then horizontal position).
/// Both lookup indexes are derived from that order and are dropped whenever
/// the word sequence changes.
#[derive(Debug, Clone, Default)]
pub struct Page {
    id: u32,
    words: Vec<Word>,
    sorted: bool,
    /// text -> ascending indexes into `words`
    positions: Option<HashMap<String, Vec<usize>>>,
    /// text -> placements in reading order
    placements: Option<HashMap<String, Vec<Placement>>>,
}

impl Page {
    /// Create an empty page.
    pub fn new(id: u32) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    /// Create a page holding `words` in the given order, unsorted and unindexed.
    pub fn with_words(id: u32, words: Vec<Word>) -> Self {
        Self {
            id,
            words,
            ..Default::default()
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Append a word; the page has to be sorted and indexed again afterwards.
    pub fn push(&mut self, word: Word) {
        self.words.push(word);
        self.invalidate();
    }

    /// Sort words into reading order. Stable for words sharing a placement.
    pub fn sort(&mut self) {
        if !self.sorted {
            self.words.sort_by_key(Word::placement);
            self.invalidate();
            self.sorted = true;
        }
    }

    /// Build the text -> sorted positions index over the sorted words.
    pub fn build_position_index(&mut self) {
        self.sort();
        let mut positions: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, word) in self.words.iter().enumerate() {
            positions.entry(word.text.clone()).or_default().push(idx);
        }
        self.positions = Some(positions);
    }

    /// Build the text -> placements index over the sorted words.
    pub fn build_adjacency_index(&mut self) {
        self.sort();
        let mut placements: HashMap<String, Vec<Placement>> = HashMap::new();
        for word in &self.words {
            placements
                .entry(word.text.clone())
                .or_default()
                .push(word.placement());
        }
        self.placements = Some(placements);
    }

    /// Sort and build both indexes.
    pub fn prepare(&mut self) {
        self.sort();
        self.build_position_index();
        self.build_adjacency_index();
    }

    /// Sorted positions of `text`, or `None` if absent or the index is not built.
    pub fn positions(&self, text: &str) -> Option<&[usize]> {
        self.positions.as_ref()?.get(text).map(Vec::as_slice)
    }

    /// Placements of `text` in reading order, or `None` if absent or the index is not built.
    pub fn placements(&self, text: &str) -> Option<&[Placement]> {
        self.placements.as_ref()?.get(text).map(Vec::as_slice)
    }

    pub fn has_position_index(&self) -> bool {
        self.positions.as_ref().is_some_and(|m| !m.is_empty())
    }

    pub fn has_adjacency_index(&self) -> bool {
        self.placements.as_ref().is_some_and(|m| !m.is_empty())
    }

    /// Distinct word texts in page order.
    pub fn distinct_texts(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.words
            .iter()
            .map(|w| w.text.as_str())
            .filter(|text| seen.insert(*text))
            .collect()
    }

    fn invalidate(&mut self) {
        self.sorted = false;
        self.positions = None;
        self.placements = None;
    }
}
