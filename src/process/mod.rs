// src/process/mod.rs
use crate::error::LoadError;
use crate::types::{Dataset, Row};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::{Cursor, Read};
use tracing::{debug, trace, warn};

/// Parse CSV text into a [`Dataset`].
pub fn parse_dataset(text: &str) -> Result<Dataset, LoadError> {
    parse_reader(Cursor::new(text.as_bytes()))
}

/// Parse a raw CSV body. Invalid UTF-8 surfaces as [`LoadError::Parse`].
pub fn parse_bytes(body: &[u8]) -> Result<Dataset, LoadError> {
    parse_reader(Cursor::new(body))
}

/// Read a header record followed by data records:
/// - header names and every cell are trimmed
/// - blank lines are skipped
/// - short records are padded with empty strings, surplus cells dropped
pub fn parse_reader<R: Read>(reader: R) -> Result<Dataset, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // ragged rows are padded below, not rejected
        .trim(Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|source| LoadError::Parse { record: 0, source })?
        .iter()
        .map(str::to_string)
        .collect();
    debug!(columns = headers.len(), ?headers, "parsed CSV header");

    if headers.iter().all(String::is_empty) {
        return Ok(Dataset::default());
    }

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    let mut idx = 0usize;
    loop {
        idx += 1;
        let more = rdr
            .read_record(&mut record)
            .map_err(|source| LoadError::Parse {
                record: idx,
                source,
            })?;
        if !more {
            break;
        }
        if is_blank(&record) {
            trace!(record = idx, "skipping blank line");
            continue;
        }
        if record.len() != headers.len() {
            warn!(
                record = idx,
                expected = headers.len(),
                found = record.len(),
                "ragged CSV record"
            );
        }
        rows.push(to_row(&headers, &record));
    }

    Ok(Dataset::new(headers, rows))
}

/// A whitespace-only line parses as one empty field.
fn is_blank(record: &StringRecord) -> bool {
    record.len() <= 1 && record.get(0).map_or(true, str::is_empty)
}

fn to_row(headers: &[String], record: &StringRecord) -> Row {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.clone(), record.get(i).unwrap_or("").to_string()))
        .collect()
}
