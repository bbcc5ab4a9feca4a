use tokio::fs;
use std::sync::OnceLock;
use tracing::info;
use tokio::net::TcpListener;

use chart_url::{ChartConfig, ChartUrlError, Result};
use crate::models::host_model::HostConfig;

static CONFIG_CACHE: OnceLock<HostConfig> = OnceLock::new();

pub const DEFAULT_CONFIG_PATH: &str = "chart_url.json";

pub async fn init_config_and_bind(file_path: &str) -> Result<TcpListener> {
    let data = fs::read_to_string(file_path).await?;

    let mut config: HostConfig = serde_json::from_str(&data)?;

    let bind_addr = format!("{}:{}", config.connection.ip, config.connection.port);

    let listener = TcpListener::bind(&bind_addr).await?;

    // Port 0 asks the OS for one; record what we actually got
    config.connection.port = listener.local_addr()?.port();

    CONFIG_CACHE
        .set(config)
        .map_err(|_| ChartUrlError::Config("Config already initialized".to_string()))?;

    info!("Config loaded from {}, listening on {}", file_path, bind_addr);

    Ok(listener)
}

pub async fn load_chart_config(path: &str) -> Result<ChartConfig> {
    let data = fs::read_to_string(path).await?;
    let config = ChartConfig::from_json(&data)?;
    info!("Chart config loaded from {} (slug {:?})", path, config.slug);
    Ok(config)
}

pub fn get_cached_config() -> Result<&'static HostConfig> {
    CONFIG_CACHE
        .get()
        .ok_or_else(|| ChartUrlError::Config("Config not initialized".to_string()))
}
