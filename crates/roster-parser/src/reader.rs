use std::fs;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::errors::TableError;
use crate::model::{RawRow, RawTable};

const BOM: char = '\u{feff}';

/// Load a whole CSV export into memory and decode it.
pub fn read_table(path: impl AsRef<Path>) -> Result<RawTable, TableError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| TableError::SourceRead {
        path: path.to_path_buf(),
        source,
    })?;
    let table = parse_table(&content)?;
    debug!(
        path = %path.display(),
        columns = table.headers.len(),
        rows = table.rows.len(),
        "decoded source table"
    );
    Ok(table)
}

pub fn parse_table(content: &str) -> Result<RawTable, TableError> {
    parse_reader(content.as_bytes())
}

/// Decode CSV from any reader. The first record is the header; blank lines
/// are skipped and rows may be shorter or longer than the header.
pub fn parse_reader<R: Read>(source: R) -> Result<RawTable, TableError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(source);
    let mut records = reader.records();

    let headers = match records.next() {
        Some(record) => header_names(&record.map_err(TableError::malformed)?),
        None => return Ok(RawTable::default()),
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(TableError::malformed)?;
        let line = record.position().map(|pos| pos.line()).unwrap_or(0);
        if record.len() > headers.len() {
            debug!(
                line,
                extra = record.len() - headers.len(),
                "dropping fields beyond header width"
            );
        }
        // short rows still carry every header key
        let fields = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), record.get(idx).unwrap_or("").to_string()))
            .collect();
        rows.push(RawRow::new(fields).with_source_line(line));
    }

    Ok(RawTable { headers, rows })
}

fn header_names(record: &StringRecord) -> Vec<String> {
    record
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            if idx == 0 {
                name.trim_start_matches(BOM).to_string()
            } else {
                name.to_string()
            }
        })
        .collect()
}
