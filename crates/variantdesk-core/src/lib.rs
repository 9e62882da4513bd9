pub mod app_config;
pub mod config;
pub mod export;
pub mod records;
pub mod state;
pub mod store;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use export::{export_records, ExportError, ExportFormat, DEFAULT_EXPORT_FILENAME};
pub use records::{Column, ProductId, Record, UnknownColumn};
pub use state::{AppState, FetchEvent, FetchPhase};
pub use store::{filter, merge, sort_records, RecordStore, SearchField, SharedStore, SortState};
