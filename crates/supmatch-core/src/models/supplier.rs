//! Catalog entries.

use serde::{Deserialize, Serialize};

/// A known supplier: catalog identifier plus space-separated name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Supplier {
    /// Catalog identifier (a run of digits).
    pub id: String,

    /// Full supplier name.
    pub name: String,
}

impl Supplier {
    /// Create a new supplier entry.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Words of the name, in order.
    pub fn name_tokens(&self) -> Vec<&str> {
        self.name.split_whitespace().collect()
    }

    /// First word of the name; the catalog index key.
    pub fn leading_word(&self) -> Option<&str> {
        self.name.split_whitespace().next()
    }

    /// The `id,name` line stored in the flattened catalog.
    pub fn to_line(&self) -> String {
        format!("{},{}\n", self.id, self.name)
    }
}

impl std::fmt::Display for Supplier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.id, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_tokens() {
        let supplier = Supplier::new("123", "Demo  Company Ltd");
        assert_eq!(supplier.name_tokens(), vec!["Demo", "Company", "Ltd"]);
        assert_eq!(supplier.leading_word(), Some("Demo"));
    }

    #[test]
    fn test_blank_name_has_no_leading_word() {
        let supplier = Supplier::new("7", "   ");
        assert!(supplier.name_tokens().is_empty());
        assert_eq!(supplier.leading_word(), None);
    }

    #[test]
    fn test_to_line() {
        assert_eq!(Supplier::new("9", "Acme Corp").to_line(), "9,Acme Corp\n");
    }
}
