//! Delimited file writer

use crate::config::OutputConfig;
use crate::output::ExportTable;
use crate::Result;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const BYTE_ORDER_MARK: &[u8] = "\u{feff}".as_bytes();

/// Appends `.csv` to a path unless it already has that extension
///
/// # Examples
///
/// ```
/// use shop_harvest::output::ensure_csv_extension;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(ensure_csv_extension(Path::new("out")), PathBuf::from("out.csv"));
/// assert_eq!(ensure_csv_extension(Path::new("out.CSV")), PathBuf::from("out.CSV"));
/// assert_eq!(ensure_csv_extension(Path::new("out.txt")), PathBuf::from("out.txt.csv"));
/// ```
pub fn ensure_csv_extension(path: &Path) -> PathBuf {
    let is_csv = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if is_csv {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_owned();
        name.push(".csv");
        PathBuf::from(name)
    }
}

/// Writes a table to `path` (with `.csv` appended when missing)
///
/// Rows go to a temporary file next to the destination, which replaces the
/// destination only once every row is written. The header row, when present,
/// comes first.
///
/// # Returns
///
/// * `Ok(PathBuf)` - The path actually written
/// * `Err(HarvestError)` - The file could not be created or written
pub fn write_table(path: &Path, table: &ExportTable, config: &OutputConfig) -> Result<PathBuf> {
    let path = ensure_csv_extension(path);
    let delimiter = config.delimiter_byte()?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;

    if config.byte_order_mark {
        file.write_all(BYTE_ORDER_MARK)?;
    }

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_writer(&mut file);

    if let Some(header) = &table.header {
        writer.write_record(header)?;
    }
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    drop(writer);

    file.persist(&path).map_err(|e| e.error)?;

    tracing::info!(
        "Wrote {} rows{} to {}",
        table.rows.len(),
        if table.header.is_some() { " plus header" } else { "" },
        path.display()
    );

    Ok(path)
}
