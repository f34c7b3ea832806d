//! Positioned invoice tokens.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// One word extracted from an invoice, with its page, line and horizontal slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Word {
    /// Recognized text.
    pub text: String,

    /// Page the word was found on.
    pub page_id: u32,

    /// Line within the page.
    pub line_id: u32,

    /// Horizontal position within the line.
    pub pos_id: u32,
}

impl Word {
    /// Create a new word.
    pub fn new(text: impl Into<String>, page_id: u32, line_id: u32, pos_id: u32) -> Self {
        Self {
            text: text.into(),
            page_id,
            line_id,
            pos_id,
        }
    }

    /// Location of the word within its page.
    pub fn placement(&self) -> Placement {
        Placement {
            line_id: self.line_id,
            pos_id: self.pos_id,
        }
    }
}

/// Reading-order location of a word on a page.
///
/// Ordered by line first, then by horizontal position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub line_id: u32,
    pub pos_id: u32,
}

impl Placement {
    pub fn new(line_id: u32, pos_id: u32) -> Self {
        Self { line_id, pos_id }
    }

    /// Whether `next` may continue a name started at `self`: same line or the one after.
    pub fn reaches(&self, next: &Placement) -> bool {
        next.line_id <= self.line_id.saturating_add(1)
    }
}

impl Ord for Placement {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line_id
            .cmp(&other.line_id)
            .then(self.pos_id.cmp(&other.pos_id))
    }
}

impl PartialOrd for Placement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
