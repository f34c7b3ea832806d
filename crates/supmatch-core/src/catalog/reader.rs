use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use crate::error::{ParseError, Result};
use crate::models::Supplier;
use crate::patterns::SUPPLIER_LINE;

/// Parse an `id,name` line; `None` if it does not have that shape.
pub fn parse_supplier_line(line: &str) -> Option<Supplier> {
    let line = line.trim_end_matches(['\r', '\n']);
    let caps = SUPPLIER_LINE.captures(line)?;
    Some(Supplier::new(&caps[1], &caps[2]))
}

/// Streams suppliers from a catalog file.
///
/// The first line is a header and is skipped; blank lines are ignored.
/// Iteration stops after the first error.
pub struct CatalogReader<R> {
    lines: Lines<R>,
    line_no: usize,
    failed: bool,
}

impl<R: BufRead> CatalogReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            failed: false,
        }
    }
}

impl CatalogReader<BufReader<File>> {
    /// Open a catalog file.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Iterator for CatalogReader<R> {
    type Item = Result<Supplier>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e.into()));
                }
            };
            self.line_no += 1;

            if self.line_no == 1 || line.trim().is_empty() {
                continue;
            }

            return Some(match parse_supplier_line(&line) {
                Some(supplier) => Ok(supplier),
                None => {
                    self.failed = true;
                    Err(ParseError::InvalidCatalogLine {
                        line: self.line_no,
                        content: line,
                    }
                    .into())
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SupmatchError;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    #[test]
    fn test_parse_supplier_line() {
        assert_eq!(
            parse_supplier_line("123,Demo Company\r"),
            Some(Supplier::new("123", "Demo Company"))
        );
        assert_eq!(parse_supplier_line("Demo Company"), None);
    }

    #[test]
    fn test_reader_skips_header() {
        let input = "SupplierId,SupplierName\n1,Demo Company\n\n2,Acme Corp\n";
        let suppliers: Vec<Supplier> = CatalogReader::new(Cursor::new(input))
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(
            suppliers,
            vec![Supplier::new("1", "Demo Company"), Supplier::new("2", "Acme Corp")]
        );
    }

    #[test]
    fn test_reader_stops_on_invalid_line() {
        let input = "header\n1,Demo Company\nnot a supplier\n2,Acme Corp\n";
        let mut reader = CatalogReader::new(Cursor::new(input));

        assert!(reader.next().unwrap().is_ok());
        let err = reader.next().unwrap().unwrap_err();
        assert!(matches!(
            err,
            SupmatchError::Parse(ParseError::InvalidCatalogLine { line: 3, .. })
        ));
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_reader_header_only() {
        assert_eq!(CatalogReader::new(Cursor::new("header\n")).count(), 0);
    }
}
