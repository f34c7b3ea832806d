//! Invoice token dump decoding.

mod tokens;

pub use tokens::{load_invoice, parse_token_line, read_tokens};
