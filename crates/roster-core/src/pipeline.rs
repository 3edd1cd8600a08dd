use std::collections::BTreeMap;
use std::path::Path;

use roster_parser::{read_table, write_records, RawRow};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::fields::{canonical_field_specs, FieldSpecs, OUTPUT_HEADER};
use crate::filter::RowFilter;
use crate::normalizer::{normalize, CanonicalRecord};
use crate::resolver::{resolve, ResolvedKeyMap};

#[derive(Debug, Clone, Serialize)]
pub struct ColumnResolution {
    pub field: &'static str,
    pub column: String,
    pub matched: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineSummary {
    pub rows_parsed: usize,
    pub rows_retained: usize,
    pub rejected: BTreeMap<&'static str, usize>,
    pub columns: Vec<ColumnResolution>,
}

impl PipelineSummary {
    fn record_columns(&mut self, keys: &ResolvedKeyMap) {
        self.columns = keys
            .iter()
            .map(|(field, key)| ColumnResolution {
                field: field.header(),
                column: key.column.clone(),
                matched: key.matched,
            })
            .collect();
    }
}

#[derive(Debug, Clone, Default)]
pub struct PipelineOutput {
    /// Admissible records in source order.
    pub records: Vec<CanonicalRecord>,
    pub summary: PipelineSummary,
}

pub fn run(rows: &[RawRow]) -> PipelineOutput {
    run_with(rows, canonical_field_specs(), &RowFilter::default())
}

/// Headers are resolved once from the first row and reused for every row;
/// the export is assumed to carry one header for the whole table.
pub fn run_with(rows: &[RawRow], specs: &FieldSpecs, filter: &RowFilter) -> PipelineOutput {
    let mut output = PipelineOutput::default();
    output.summary.rows_parsed = rows.len();

    let Some(first) = rows.first() else {
        info!("source table has no rows");
        return output;
    };

    let keys = resolve(first.keys(), specs);
    output.summary.record_columns(&keys);

    for row in rows {
        let record = normalize(row, &keys);
        match filter.rejection(&record) {
            None => output.records.push(record),
            Some(reason) => {
                debug!(line = ?row.source_line(), reason, "skipping row");
                *output.summary.rejected.entry(reason).or_insert(0) += 1;
            }
        }
    }

    output.summary.rows_retained = output.records.len();
    info!(
        rows_parsed = output.summary.rows_parsed,
        rows_retained = output.summary.rows_retained,
        "normalized participant rows"
    );
    output
}

/// Read `input`, normalize it and write the participant table to `output`.
///
/// Nothing is written unless the source was read and decoded in full.
#[tracing::instrument(level = "info", skip_all, fields(input = %input.display(), output = %output.display()))]
pub fn run_file(input: &Path, output: &Path) -> Result<PipelineOutput> {
    let table = read_table(input)?;
    info!(rows = table.rows.len(), "parsed rows from source table");

    let result = run(&table.rows);
    write_records(output, &OUTPUT_HEADER, &result.records)?;
    info!(rows = result.records.len(), "wrote participant table");

    Ok(result)
}
