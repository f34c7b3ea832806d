//! Regex patterns for the line-oriented input formats.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // One token record of the OCR dump:
    // {'pos_id': 1, 'bbox': ..., 'word': 'Demo', 'line_id': 4, 'block_id': 0, 'page_id': 1, ...}
    pub static ref INVOICE_TOKEN: Regex = Regex::new(
        r"'pos_id': (\d+), .+'word': '(.+)', 'line_id': (\d+), .+'page_id': (\d+),"
    ).unwrap();

    // Catalog and flattened catalog lines: <digits>,<name>
    pub static ref SUPPLIER_LINE: Regex = Regex::new(
        r"^(\d+),(.+)$"
    ).unwrap();
}
