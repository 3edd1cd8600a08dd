use std::path::PathBuf;

use roster_parser::TableError;
use thiserror::Error;

use crate::fields::CanonicalField;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error(transparent)]
    Table(#[from] TableError),

    #[error("failed to read configuration {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for {key}: {message}")]
    Config { key: &'static str, message: String },

    #[error("expected one field spec for '{field}', found {count}")]
    FieldSpecs { field: CanonicalField, count: usize },
}

pub type Result<T> = std::result::Result<T, RosterError>;
