use crate::log::row::{LogRow, split_rows};
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolve `path`, read it as UTF-8 and split it into rows.
///
/// Both failures are fatal for the run: a path that does not resolve is
/// reported as "file not found", an unreadable file as "open file error".
pub fn parse_log_file(path: impl AsRef<Path>) -> anyhow::Result<(PathBuf, Vec<LogRow>)> {
    let path = path.as_ref();
    let full_path = fs::canonicalize(path)
        .with_context(|| format!("file not found: {}", path.display()))?;

    let text = fs::read_to_string(&full_path)
        .with_context(|| format!("open file error: {}", full_path.display()))?;

    let rows = split_rows(&text);
    Ok((full_path, rows))
}
