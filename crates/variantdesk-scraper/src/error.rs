use thiserror::Error;
use variantdesk_core::FetchPhase;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Blank URL; rejected before any network activity.
    #[error("please paste a color-variants URL")]
    InvalidInput,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON parse error for {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// Terminal phase this error puts the fetch lifecycle in.
    #[must_use]
    pub fn phase(&self) -> FetchPhase {
        match self {
            FetchError::InvalidInput => FetchPhase::Idle,
            FetchError::Http(_) | FetchError::UnexpectedStatus { .. } => FetchPhase::NetworkError,
            FetchError::Parse { .. } => FetchPhase::ParseError,
        }
    }

    #[must_use]
    pub fn is_network(&self) -> bool {
        self.phase() == FetchPhase::NetworkError
    }
}
