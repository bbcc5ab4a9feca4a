use axum::Router;
use std::time::Duration;
use tracing::{info, Level};

use chart_url::{Chart, LiveChart, LoadOptions, LocationPort, MemoryLocation, UrlBinder};

mod models;
mod routes;
mod state;
mod utils;

use crate::state::app_state::AppState;
use crate::utils::conf_helper::{get_cached_config, init_config_and_bind, load_chart_config, DEFAULT_CONFIG_PATH};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    // === CONFIG + LISTENER ===
    let listener = init_config_and_bind(&config_path).await?;
    let config = get_cached_config()?;

    // === CHART ===
    let authored = load_chart_config(&config.chart_path).await?;
    let location = MemoryLocation::new(config.initial_query.clone());
    let mut chart = Chart::new(
        authored,
        LoadOptions {
            query_str: Some(location.query_str()),
            time_display: config.time_display,
        },
    );
    chart.drop_unchanged_params = config.drop_unchanged_params;

    let state = AppState::new(
        LiveChart::new(chart),
        location,
        UrlBinder::with_debounce(Duration::from_millis(config.debounce_ms)),
    );
    state.bind().await?;

    info!(
        "Server initialized on {}:{}",
        config.connection.ip,
        config.connection.port
    );

    let app = Router::new()
        .merge(routes::info_routes::health_routes())
        .merge(routes::chart_routes::chart_routes(state.clone()));

    axum::serve(listener, app).await?;

    state.binder.lock().await.unbind_from_window();
    Ok(())
}
