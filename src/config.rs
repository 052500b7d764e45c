use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SERVICE_ROOT: &str = "http://localhost:3000";
pub const CATALOG_PATH: &str = "/api/docs/endpoints";
/// Budget for the whole catalog exchange, connect through body.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    pub service_root: String,
    pub request_timeout: Duration,
    pub store_path: PathBuf,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            service_root: DEFAULT_SERVICE_ROOT.to_string(),
            request_timeout: REQUEST_TIMEOUT,
            store_path: default_store_path(),
        }
    }
}

impl ExplorerConfig {
    pub fn catalog_url(&self) -> String {
        format!("{}{}", self.service_root.trim_end_matches('/'), CATALOG_PATH)
    }
}

pub fn default_store_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("api-docs-explorer")
        .join("store.json")
}
