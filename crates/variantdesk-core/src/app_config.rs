use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Whole-request timeout applied to the single variants GET.
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Spreadsheet written by the export command; overwritten on every export.
    pub export_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            request_timeout_secs: 40,
            connect_timeout_secs: 10,
            export_path: PathBuf::from(crate::export::DEFAULT_EXPORT_FILENAME),
        }
    }
}
