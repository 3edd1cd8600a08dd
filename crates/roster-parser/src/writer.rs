use std::fs;
use std::io;
use std::path::Path;

use csv::WriterBuilder;
use serde::Serialize;

use crate::errors::TableError;

/// Serialize `records` as CSV under a fixed header row.
///
/// The header is written even when there are no records, so an empty run
/// still produces a well-formed table.
pub fn encode_records<'a, T, I>(header: &[&str], records: I) -> Result<Vec<u8>, TableError>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(header).map_err(TableError::Encode)?;
    for record in records {
        writer.serialize(record).map_err(TableError::Encode)?;
    }
    writer
        .into_inner()
        .map_err(|err| TableError::Encode(err.into_error().into()))
}

/// Encode first, then write the file in one go so a failed encode leaves
/// nothing behind.
pub fn write_records<'a, T, I>(
    path: impl AsRef<Path>,
    header: &[&str],
    records: I,
) -> Result<(), TableError>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let path = path.as_ref();
    let bytes = encode_records(header, records)?;
    let destination_error = |source: io::Error| TableError::DestinationWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(destination_error)?;
    }
    fs::write(path, bytes).map_err(destination_error)
}
