use serde::{Deserialize, Serialize};

use chart_url::TimeDisplay;

#[derive(Debug, Serialize, Deserialize)]
pub struct HostConfig {
    pub name: String,
    pub connection: Connection,
    /// Path of the authored chart JSON.
    pub chart_path: String,
    #[serde(default)]
    pub time_display: TimeDisplay,
    /// Query string the host location starts with, as if the page was opened with it.
    #[serde(default)]
    pub initial_query: String,
    #[serde(default = "default_drop_unchanged_params")]
    pub drop_unchanged_params: bool,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Connection {
    pub ip: String,
    pub port: u16,
}

fn default_drop_unchanged_params() -> bool {
    true
}

fn default_debounce_ms() -> u64 {
    chart_url::core::constants::URL_DEBOUNCE_MS
}
