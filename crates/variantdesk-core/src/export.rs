//! Spreadsheet export of the Record Store.
//!
//! The format follows the file extension: `.csv` and `.json` are written
//! as such, anything else as an Excel workbook.

use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use thiserror::Error;

use crate::records::{Column, Record};

/// File written when no export path is configured.
pub const DEFAULT_EXPORT_FILENAME: &str = "urunler.xlsx";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
    Json,
}

impl ExportFormat {
    /// Picks the format from the extension of `path`, case-insensitively.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("csv") => ExportFormat::Csv,
            Some("json") => ExportFormat::Json,
            _ => ExportFormat::Xlsx,
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write workbook {path}: {source}")]
    Xlsx {
        path: String,
        #[source]
        source: XlsxError,
    },

    #[error("failed to write {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Writes `records` to `path`: one header row in [`Column::ALL`] order,
/// then one row per record in the order given. JSON exports are an array
/// of records instead.
///
/// The file is replaced on every call. Returns the number of data rows.
///
/// # Errors
///
/// Returns [`ExportError`] if the file cannot be created or written.
pub fn export_records(path: &Path, records: &[Record]) -> Result<usize, ExportError> {
    match ExportFormat::from_path(path) {
        ExportFormat::Xlsx => write_xlsx(path, records),
        ExportFormat::Csv => write_csv(path, records),
        ExportFormat::Json => write_json(path, records),
    }?;
    Ok(records.len())
}

/// Numeric columns are written as numbers, everything else as strings.
/// Absent values and empty strings leave the cell blank.
fn write_xlsx(path: &Path, records: &[Record]) -> Result<(), ExportError> {
    let xlsx_err = |source: XlsxError| ExportError::Xlsx {
        path: path.display().to_string(),
        source,
    };

    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();

    for (col, column) in (0_u16..).zip(Column::ALL) {
        worksheet
            .write_string_with_format(0, col, column.header(), &header)
            .map_err(xlsx_err)?;
    }

    for (idx, record) in records.iter().enumerate() {
        // Out-of-range rows are rejected by the worksheet itself.
        let row = u32::try_from(idx + 1).unwrap_or(u32::MAX);
        for (col, column) in (0_u16..).zip(Column::ALL) {
            if let Some(number) = record.number(column) {
                worksheet.write_number(row, col, number).map_err(xlsx_err)?;
                continue;
            }
            let text = record.cell(column);
            if !text.is_empty() {
                worksheet
                    .write_string(row, col, text.as_str())
                    .map_err(xlsx_err)?;
            }
        }
    }

    workbook.save(path).map_err(xlsx_err)
}

fn write_csv(path: &Path, records: &[Record]) -> Result<(), ExportError> {
    let csv_err = |source: csv::Error| ExportError::Csv {
        path: path.display().to_string(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
    writer.write_record(Column::headers()).map_err(csv_err)?;
    for record in records {
        writer.write_record(record.cells()).map_err(csv_err)?;
    }
    writer.flush().map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn write_json(path: &Path, records: &[Record]) -> Result<(), ExportError> {
    let io_err = |source: std::io::Error| ExportError::Io {
        path: path.display().to_string(),
        source,
    };

    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
    serde_json::to_writer_pretty(&mut writer, records).map_err(|source| ExportError::Json {
        path: path.display().to_string(),
        source,
    })?;
    writer.flush().map_err(io_err)
}

#[cfg(test)]
#[path = "export_test.rs"]
mod tests;
