//! Output module for exported tables
//!
//! This module handles:
//! - Writing header and data rows as a delimited file
//! - Reporting what an export wrote

mod csv_writer;

pub use csv_writer::{ensure_csv_extension, write_table};

use crate::url::UrlKind;
use std::path::PathBuf;

/// Rows ready for export, with an optional header row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportTable {
    pub header: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

/// Summary of a completed export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    /// File written, `.csv` extension included
    pub path: PathBuf,

    /// Record schema the URLs were exported with
    pub kind: UrlKind,

    /// Number of data rows, header excluded
    pub rows: usize,

    /// Whether a header row was written
    pub header: bool,
}
