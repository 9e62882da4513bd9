use std::path::Path;

use variantdesk_core::{export_records, AppState};

/// Writes every record in store order to `path`.
///
/// Returns `Ok(None)` without touching the file system when the store is
/// empty, otherwise the number of rows written.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub(crate) fn export_store(state: &AppState, path: &Path) -> anyhow::Result<Option<usize>> {
    let records = state.snapshot();
    if records.is_empty() {
        return Ok(None);
    }
    let written = export_records(path, &records)?;
    tracing::info!(path = %path.display(), rows = written, "exported records");
    Ok(Some(written))
}

/// Status line for an export attempt.
pub(crate) fn export_status(state: &AppState, path: &Path) -> String {
    match export_store(state, path) {
        Ok(None) => "There is no data to export.".to_string(),
        Ok(Some(rows)) => format!("Saved {rows} rows to {}.", path.display()),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "export failed");
            format!("Export failed: {err}")
        }
    }
}
