//! One-shot `fetch` command: fetch every URL in order, then print the grid.

use std::path::PathBuf;

use variantdesk_core::{AppConfig, AppState, SearchField, SortState};
use variantdesk_scraper::{FetchOrchestrator, VariantsClient};

use crate::{export, grid};

/// Display and export settings for a one-shot run.
#[derive(Debug)]
pub(crate) struct FetchOptions {
    pub search_field: SearchField,
    pub query: String,
    pub sort: Option<SortState>,
    pub export: Option<PathBuf>,
}

/// Fetches `urls` sequentially into one store and prints the filtered,
/// sorted grid followed by a summary line.
///
/// Per-URL failures are reported and skipped.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built, if every URL
/// failed, or if the requested export cannot be written.
pub(crate) async fn run_fetch(
    config: &AppConfig,
    urls: &[String],
    options: FetchOptions,
) -> anyhow::Result<()> {
    let client = VariantsClient::from_config(config)?;
    let mut state = AppState::default();
    let orchestrator = FetchOrchestrator::new(client, state.store());

    let mut failures = 0_usize;
    for url in urls {
        let report = orchestrator.fetch_report(url).await;
        if report.result.is_err() {
            failures += 1;
        }
        let status = report.status_line();
        eprintln!("{}: {status}", report.url);
        state.finish_fetch(&report.url, report.phase(), status);
    }

    if failures == urls.len() {
        anyhow::bail!("all {failures} fetches failed");
    }

    state.set_search(options.search_field, &options.query);
    state.set_sort(options.sort);

    let rows = state.view();
    print!("{}", grid::render(&rows, state.sort()));
    println!("{} of {} records", rows.len(), state.total());

    if let Some(path) = options.export {
        match export::export_store(&state, &path)? {
            Some(written) => eprintln!("Saved {written} rows to {}.", path.display()),
            None => eprintln!("There is no data to export."),
        }
    }

    Ok(())
}
