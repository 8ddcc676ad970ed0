//! Log acquisition: read the raw file and split it into a grid of cells.

pub mod parse;
pub mod row;

pub use parse::parse_log_file;
