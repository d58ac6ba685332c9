//! CSV reading utilities.

mod header;
mod reader;

pub use header::normalize_headers;
pub use reader::{
    MAX_CSV_FILE_SIZE, check_file_size_with_limit, read_csv_from_reader, read_csv_table,
};
