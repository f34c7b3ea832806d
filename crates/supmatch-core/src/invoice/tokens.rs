use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::{ParseError, Result};
use crate::models::Word;
use crate::patterns::INVOICE_TOKEN;

/// Parse one token record. `line_no` is 1-based and only used for error reporting.
pub fn parse_token_line(line: &str, line_no: usize) -> Result<Word> {
    let caps = INVOICE_TOKEN.captures(line).ok_or_else(|| ParseError::InvalidToken {
        line: line_no,
        content: line.to_string(),
    })?;

    let pos_id = parse_id("pos_id", &caps[1])?;
    let line_id = parse_id("line_id", &caps[3])?;
    let page_id = parse_id("page_id", &caps[4])?;

    Ok(Word::new(&caps[2], page_id, line_id, pos_id))
}

fn parse_id(field: &'static str, value: &str) -> Result<u32> {
    value.parse::<u32>().map_err(|_| {
        ParseError::InvalidNumber {
            field,
            value: value.to_string(),
        }
        .into()
    })
}

/// Read every token from a token dump. Blank lines are skipped.
pub fn read_tokens<R: BufRead>(reader: R) -> Result<Vec<Word>> {
    let mut words = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        words.push(parse_token_line(&line, idx + 1)?);
    }
    Ok(words)
}

/// Load all tokens of an invoice file.
pub fn load_invoice(path: &Path) -> Result<Vec<Word>> {
    let file = File::open(path)?;
    let words = read_tokens(BufReader::new(file))?;
    debug!("Loaded {} tokens from {}", words.len(), path.display());
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SupmatchError;
    use pretty_assertions::assert_eq;
    use std::io::{Cursor, Write};

    fn record(word: &str, page: u32, line: u32, pos: u32) -> String {
        format!(
            "{{'pos_id': {pos}, 'bbox': [1, 2, 3, 4], 'word': '{word}', 'line_id': {line}, 'block_id': 0, 'page_id': {page}, 'confidence': 0.98}}"
        )
    }

    #[test]
    fn test_parse_token_line() {
        let word = parse_token_line(&record("Demo", 1, 4, 0), 1).unwrap();
        assert_eq!(word, Word::new("Demo", 1, 4, 0));
    }

    #[test]
    fn test_parse_invalid_token() {
        let err = parse_token_line("{'word': 'Demo'}", 3).unwrap_err();
        assert!(matches!(
            err,
            SupmatchError::Parse(ParseError::InvalidToken { line: 3, .. })
        ));
    }

    #[test]
    fn test_parse_out_of_range_number() {
        let err = parse_token_line(&record("Demo", 1, 4, 0).replace("'pos_id': 0", "'pos_id': 99999999999"), 1)
            .unwrap_err();
        assert!(matches!(
            err,
            SupmatchError::Parse(ParseError::InvalidNumber { field: "pos_id", .. })
        ));
    }

    #[test]
    fn test_read_tokens_skips_blank_lines() {
        let input = format!("{}\n\n{}\n", record("INVOICE", 1, 0, 1), record("Demo", 1, 4, 0));
        let words = read_tokens(Cursor::new(input)).unwrap();
        assert_eq!(words, vec![Word::new("INVOICE", 1, 0, 1), Word::new("Demo", 1, 4, 0)]);
    }

    #[test]
    fn test_load_invoice() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", record("Company", 2, 4, 1)).unwrap();

        let words = load_invoice(file.path()).unwrap();
        assert_eq!(words, vec![Word::new("Company", 2, 4, 1)]);
    }

    #[test]
    fn test_load_missing_invoice() {
        let err = load_invoice(Path::new("/nonexistent/invoice.txt")).unwrap_err();
        assert!(matches!(err, SupmatchError::Io(_)));
    }
}
