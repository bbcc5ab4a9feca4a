// Wire-format constants for chart URL state

/// Sentinel for "earliest available". Equal to `-(2^53 - 1)` so it stays exact
/// when round-tripped through a JS number.
pub const UNBOUNDED_LEFT: i64 = -9_007_199_254_740_991;

/// Sentinel for "latest available".
pub const UNBOUNDED_RIGHT: i64 = 9_007_199_254_740_991;

pub const EARLIEST_KEYWORD: &str = "earliest";
pub const LATEST_KEYWORD: &str = "latest";
pub const RANGE_SEPARATOR: &str = "..";

// Day-mode epoch 2020-01-21, as days since 0001-01-01 (chrono's num_days_from_ce)
pub const EPOCH_DAYS_FROM_CE: i64 = 737_445;
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
pub const DISPLAY_DAY_FORMAT: &str = "%b %-d, %Y";

// Query parameter keys
pub const TIME_PARAM: &str = "time";
pub const YEAR_PARAM: &str = "year";
pub const TAB_PARAM: &str = "tab";
pub const OVERLAY_PARAM: &str = "overlay";
pub const STACK_MODE_PARAM: &str = "stackMode";
pub const ZOOM_TO_SELECTION_PARAM: &str = "zoomToSelection";
pub const MIN_POPULATION_FILTER_PARAM: &str = "minPopulationFilter";
pub const X_SCALE_PARAM: &str = "xScale";
pub const Y_SCALE_PARAM: &str = "yScale";
pub const LEGACY_SCALE_TYPE_PARAM: &str = "scaleType";
pub const ENDPOINTS_ONLY_PARAM: &str = "endpointsOnly";
pub const REGION_PARAM: &str = "region";
pub const COUNTRY_PARAM: &str = "country";

pub const ENTITY_SEPARATOR: char = '~';

pub const URL_DEBOUNCE_MS: u64 = 100;

pub const GRAPHER_BASE_PATH: &str = "/grapher";
