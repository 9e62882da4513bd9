//! Interactive shell over the record grid.
//!
//! Fetches run on spawned tasks. Their progress events and final reports
//! come back over channels and are applied to `AppState` here, between
//! input lines, so display state has a single owner.

mod command;

use std::io::Write as _;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use variantdesk_core::{AppConfig, AppState, FetchEvent, FetchPhase};
use variantdesk_scraper::{FetchOrchestrator, FetchReport, VariantsClient};

use self::command::{is_confirmation, parse_command, ShellCommand, HELP};
use crate::{export, grid};

const PROMPT: &str = "variantdesk> ";

/// Prompt for the next input line. While a clear is awaiting its answer
/// the confirmation question is asked again, since that line is still
/// read as the answer.
fn prompt_text(awaiting_clear: bool, total: usize) -> String {
    if awaiting_clear {
        format!("Clear all {total} records? [y/N] ")
    } else {
        PROMPT.to_string()
    }
}

fn prompt(state: &AppState, awaiting_clear: bool) {
    print!("{}", prompt_text(awaiting_clear, state.total()));
    // A failed flush only delays the prompt.
    let _ = std::io::stdout().flush();
}

/// Runs the shell until `quit` or end of input.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or stdin fails.
pub(crate) async fn run_shell(config: &AppConfig) -> anyhow::Result<()> {
    let client = VariantsClient::from_config(config)?;
    let mut state = AppState::default();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<FetchEvent>();
    let (report_tx, mut report_rx) = mpsc::unbounded_channel::<FetchReport>();
    let orchestrator = FetchOrchestrator::new(client, state.store()).with_events(event_tx);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut awaiting_clear = false;

    println!("{HELP}");
    prompt(&state, false);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };

                if awaiting_clear {
                    awaiting_clear = false;
                    if is_confirmation(&line) {
                        state.clear();
                        tracing::info!("store cleared");
                    }
                    println!("{}", state.status());
                    prompt(&state, awaiting_clear);
                    continue;
                }

                let command = match parse_command(&line) {
                    Ok(command) => command,
                    Err(err) => {
                        println!("{err}");
                        prompt(&state, awaiting_clear);
                        continue;
                    }
                };

                match command {
                    ShellCommand::Nothing => {}
                    ShellCommand::Fetch(url) => {
                        let orchestrator = orchestrator.clone();
                        let report_tx = report_tx.clone();
                        tokio::spawn(async move {
                            let report = orchestrator.fetch_report(&url).await;
                            // The receiver only closes when the shell exits.
                            let _ = report_tx.send(report);
                        });
                    }
                    ShellCommand::Search { field, query } => {
                        state.set_search(field, &query);
                        show(&state);
                    }
                    ShellCommand::Sort(column) => {
                        state.toggle_sort(column);
                        show(&state);
                    }
                    ShellCommand::Show => show(&state),
                    ShellCommand::Clear => {
                        if state.total() == 0 {
                            println!("Nothing to clear.");
                        } else {
                            awaiting_clear = true;
                        }
                    }
                    ShellCommand::Export(path) => {
                        let path = path.unwrap_or_else(|| config.export_path.clone());
                        println!("{}", export::export_status(&state, &path));
                    }
                    ShellCommand::Status => print_status(&state),
                    ShellCommand::Help => println!("{HELP}"),
                    ShellCommand::Quit => break,
                }
                prompt(&state, awaiting_clear);
            }
            Some(event) = event_rx.recv() => {
                let was_fetching = state.phase() == FetchPhase::Fetching;
                state.apply_event(event);
                if !was_fetching && state.phase() == FetchPhase::Fetching {
                    println!("\n{}", state.status());
                    prompt(&state, awaiting_clear);
                }
            }
            Some(report) = report_rx.recv() => {
                let status = report.status_line();
                state.finish_fetch(&report.url, report.phase(), status);
                println!("\n{}", state.status());
                prompt(&state, awaiting_clear);
            }
        }
    }

    Ok(())
}

fn show(state: &AppState) {
    let rows = state.view();
    print!("{}", grid::render(&rows, state.sort()));
    println!("{} of {} records", rows.len(), state.total());
}

fn print_status(state: &AppState) {
    let (field, query) = state.search();
    println!("{}", state.status());
    println!("{}", grid::progress_bar(state.progress()));
    println!("records: {}", state.total());
    if !query.is_empty() {
        println!("search: {field} contains \"{query}\"");
    }
    if let Some(sort) = state.sort() {
        let direction = if sort.descending { "descending" } else { "ascending" };
        println!("sort: {} {direction}", sort.column);
    }
}
