//! Fixed values that are not worth exposing as configuration

/// Read endpoint of the membership sheet
pub const DEFAULT_ENDPOINT: &str = "https://sheetdb.io/api/v1/h7tx1qdz2buz1";

/// Minimum time the loading indicator stays visible, in milliseconds
pub const DEFAULT_MIN_LOADING_MS: u64 = 800;

/// Directory name under the platform config/data directories
pub const APP_DIR: &str = "zyntiq";

pub const CONFIG_FILE: &str = "config.toml";
pub const LOGS_DIR: &str = "logs";
