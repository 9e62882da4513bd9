//! Fetch → parse → normalize → merge pipeline for one URL.
//!
//! The orchestrator runs on a worker task. It reports progress through an
//! optional event channel and returns a result description; it never
//! touches display state. The only shared mutation is the Record Store
//! merge, done under the store lock in one step.

use tokio::sync::mpsc::UnboundedSender;
use variantdesk_core::{FetchEvent, FetchPhase, RecordStore, SharedStore};

use crate::client::{parse_payload, VariantsClient};
use crate::error::FetchError;
use crate::normalize::normalize;

/// Progress checkpoints reported while a fetch is running.
const PROGRESS_STARTED: f32 = 0.2;
const PROGRESS_RESPONSE: f32 = 0.5;
const PROGRESS_PARSED: f32 = 0.7;
const PROGRESS_MERGED: f32 = 1.0;

/// Successful outcome of one fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Records were normalized and merged into the store.
    Merged {
        /// Records produced by the normalizer.
        fetched: usize,
        /// Records kept after the keep-first de-duplication.
        added: usize,
        /// Store size after the merge.
        total: usize,
    },
    /// Valid JSON without any extractable records; the store is unchanged.
    Empty,
}

impl FetchOutcome {
    #[must_use]
    pub fn phase(self) -> FetchPhase {
        match self {
            FetchOutcome::Merged { .. } => FetchPhase::Success,
            FetchOutcome::Empty => FetchPhase::EmptyResult,
        }
    }
}

/// Result of one fetch, handed from the worker back to the view loop.
#[derive(Debug)]
pub struct FetchReport {
    pub url: String,
    pub result: Result<FetchOutcome, FetchError>,
}

impl FetchReport {
    #[must_use]
    pub fn phase(&self) -> FetchPhase {
        match &self.result {
            Ok(outcome) => outcome.phase(),
            Err(err) => err.phase(),
        }
    }

    /// Human-readable status line for this result.
    #[must_use]
    pub fn status_line(&self) -> String {
        match &self.result {
            Ok(FetchOutcome::Merged { added, total, .. }) => {
                format!("Done (200 OK). Added {added}, total {total}.")
            }
            Ok(FetchOutcome::Empty) => "No data found or payload format is different.".to_string(),
            Err(FetchError::InvalidInput) => "Please paste a color-variants URL.".to_string(),
            Err(err @ FetchError::Parse { .. }) => format!("Parse error: {err}"),
            Err(err) => format!("Network error: {err}"),
        }
    }
}

/// Drives a single fetch against a shared Record Store.
#[derive(Debug, Clone)]
pub struct FetchOrchestrator {
    client: VariantsClient,
    store: SharedStore,
    events: Option<UnboundedSender<FetchEvent>>,
}

impl FetchOrchestrator {
    #[must_use]
    pub fn new(client: VariantsClient, store: SharedStore) -> Self {
        Self {
            client,
            store,
            events: None,
        }
    }

    /// Sends [`FetchEvent`]s to `events` while fetching.
    #[must_use]
    pub fn with_events(mut self, events: UnboundedSender<FetchEvent>) -> Self {
        self.events = Some(events);
        self
    }

    fn emit(&self, event: FetchEvent) {
        if let Some(events) = &self.events {
            // A closed receiver only means nobody is watching progress.
            let _ = events.send(event);
        }
    }

    /// Fetches `url`, normalizes the payload and merges it into the store.
    ///
    /// Progress goes `0.2 → 0.5 → 0.7 → 1.0` on success and is reset to
    /// `0.0` when the fetch ends, whatever the outcome. The terminal phase
    /// is emitted just before the reset, followed by `Idle`.
    ///
    /// # Errors
    ///
    /// - [`FetchError::InvalidInput`]: blank URL; no request is made and no
    ///   events are emitted.
    /// - [`FetchError::UnexpectedStatus`] / [`FetchError::Http`]: non-2xx
    ///   status or transport failure.
    /// - [`FetchError::Parse`]: the body is not JSON.
    ///
    /// The store is left untouched on every error.
    pub async fn fetch(&self, url: &str) -> Result<FetchOutcome, FetchError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(FetchError::InvalidInput);
        }

        self.emit(FetchEvent::Phase(FetchPhase::Fetching));
        self.emit(FetchEvent::Progress(PROGRESS_STARTED));
        tracing::info!(url, "fetching color variants");

        let result = self.run(url).await;

        match &result {
            Ok(FetchOutcome::Merged {
                fetched,
                added,
                total,
            }) => tracing::info!(url, fetched, added, total, "merged color variants"),
            Ok(FetchOutcome::Empty) => {
                tracing::info!(url, "payload contained no variant records");
            }
            Err(err) => tracing::warn!(url, error = %err, "fetch failed"),
        }

        let phase = match &result {
            Ok(outcome) => outcome.phase(),
            Err(err) => err.phase(),
        };
        self.emit(FetchEvent::Phase(phase));
        self.emit(FetchEvent::Progress(0.0));
        self.emit(FetchEvent::Phase(FetchPhase::Idle));

        result
    }

    /// Like [`Self::fetch`], packaged as a [`FetchReport`] for the view loop.
    pub async fn fetch_report(&self, url: &str) -> FetchReport {
        let result = self.fetch(url).await;
        FetchReport {
            url: url.trim().to_owned(),
            result,
        }
    }

    async fn run(&self, url: &str) -> Result<FetchOutcome, FetchError> {
        let body = self.client.fetch_body(url).await?;
        self.emit(FetchEvent::Progress(PROGRESS_RESPONSE));

        let payload = parse_payload(url, &body)?;
        let records = normalize(&payload);
        self.emit(FetchEvent::Progress(PROGRESS_PARSED));

        if records.is_empty() {
            return Ok(FetchOutcome::Empty);
        }

        let fetched = records.len();
        let (added, total) = {
            let mut store = RecordStore::lock(&self.store);
            let added = store.merge(records);
            (added, store.len())
        };
        self.emit(FetchEvent::Progress(PROGRESS_MERGED));

        Ok(FetchOutcome::Merged {
            fetched,
            added,
            total,
        })
    }
}
