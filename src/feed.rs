//! Line-delimited JSON decoding for the puzzle feed.
//!
//! Each line is decoded on its own. A line that is not JSON, or that is JSON
//! but not a valid record, is dropped and decoding continues with the next.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

/// Newline characters recognised as line separators, including the Unicode
/// line and paragraph separators.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}

/// Split on any newline character. `\r\n` produces an empty segment between
/// the two characters, which decoding discards.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_line_break)
}

/// Parse one line as JSON, then decode that value into a record.
pub fn decode_line<T: DeserializeOwned>(line: &str) -> Option<T> {
    if line.trim().is_empty() {
        return None;
    }

    let value: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(e) => {
            debug!("Skipping line that is not JSON: {}", e);
            return None;
        }
    };

    match serde_json::from_value(value) {
        Ok(record) => Some(record),
        Err(e) => {
            debug!("Skipping line that is not a valid record: {}", e);
            None
        }
    }
}

#[instrument(skip(text), fields(text_size = text.len()))]
pub fn decode_lines<T: DeserializeOwned>(text: &str) -> Vec<T> {
    let records: Vec<T> = split_lines(text).filter_map(decode_line::<T>).collect();
    debug!("Decoded {} records from feed", records.len());
    records
}
