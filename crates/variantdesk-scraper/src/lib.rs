pub mod client;
pub mod error;
pub mod normalize;
pub mod orchestrator;

pub use client::{parse_payload, VariantsClient};
pub use error::FetchError;
pub use normalize::{normalize, PRODUCT_URL_PREFIX};
pub use orchestrator::{FetchOrchestrator, FetchOutcome, FetchReport};
