pub mod errors;
pub mod model;
mod reader;
mod writer;

pub use errors::TableError;
pub use model::{RawRow, RawTable};
pub use reader::{parse_reader, parse_table, read_table};
pub use writer::{encode_records, write_records};
