pub mod config;
pub mod error;
pub mod fields;
pub mod filter;
pub mod normalizer;
pub mod pipeline;
pub mod resolver;

pub use config::RosterConfig;
pub use error::{Result, RosterError};
pub use fields::{canonical_field_specs, CanonicalField, FieldSpec, FieldSpecs, OUTPUT_HEADER};
pub use filter::{RecordPredicate, RowFilter, ThemePresent};
pub use normalizer::{normalize, CanonicalRecord};
pub use pipeline::{run, run_file, run_with, PipelineOutput, PipelineSummary};
pub use resolver::{resolve, ResolvedKey, ResolvedKeyMap};
pub use roster_parser::{RawRow, RawTable, TableError};
