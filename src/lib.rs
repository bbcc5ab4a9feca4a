// Chart URL state
// Time bounds, the chart <-> query string codec and address-bar binding

pub mod core;

// Re-export main types
pub use core::axis::{merge_domain, AxisConfig};
pub use core::chart::{Chart, LoadOptions};
pub use core::chart_config::{ChartConfig, MapConfig, MapProjection, ScaleType, StackMode, Tab};
pub use core::error::{ChartUrlError, Result};
pub use core::legacy::legacy_to_current_query_params;
pub use core::live_chart::{ListenerId, LiveChart, ObservableUrl, ParamsChange, ParamsListener};
pub use core::location::{LocationPort, MemoryLocation};
pub use core::query::{merge_query_str, query_params_to_str, str_to_query_params, QueryParams};
pub use core::time_bounds::{
    format_day, format_time_bound, format_time_range, parse_time_bound, parse_time_range,
    parse_time_range_detailed, ParsedTimeRange, TimeBound, TimeBounds, TimeDisplay,
};
pub use core::url_binder::UrlBinder;

#[cfg(test)]
mod tests {
    #[test]
    fn test_constants() {
        use crate::core::constants::*;
        assert!(UNBOUNDED_LEFT < 0 && UNBOUNDED_RIGHT > 0);
        assert_eq!(UNBOUNDED_LEFT, -UNBOUNDED_RIGHT);
        assert_eq!(URL_DEBOUNCE_MS, 100);
    }
}
