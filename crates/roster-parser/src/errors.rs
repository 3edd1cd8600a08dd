use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read source table {}: {source}", .path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed table at line {line}: {source}")]
    MalformedTable {
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("failed to encode output table: {0}")]
    Encode(#[source] csv::Error),

    #[error("failed to write output table {}: {source}", .path.display())]
    DestinationWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl TableError {
    pub(crate) fn malformed(source: csv::Error) -> Self {
        let line = source.position().map(|pos| pos.line()).unwrap_or(0);
        TableError::MalformedTable { line, source }
    }
}
