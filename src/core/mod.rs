pub mod axis;
pub mod chart;
pub mod chart_config;
pub mod constants;
pub mod error;
pub mod legacy;
pub mod live_chart;
pub mod location;
pub mod query;
pub mod time_bounds;
pub mod url_binder;
pub mod url_fields;
