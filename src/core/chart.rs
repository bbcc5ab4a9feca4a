// Chart state and the configuration <-> query parameter codec

use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::core::chart_config::{ChartConfig, Tab};
use crate::core::constants::{GRAPHER_BASE_PATH, UNBOUNDED_LEFT, UNBOUNDED_RIGHT};
use crate::core::legacy::legacy_to_current_query_params;
use crate::core::query::{query_params_to_str, str_to_query_params, QueryParams};
use crate::core::time_bounds::{TimeBound, TimeBounds, TimeDisplay};
use crate::core::url_fields::{UrlField, URL_FIELDS};

#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Query string the chart was opened with, e.g. `?time=2000..2005`.
    pub query_str: Option<String>,
    /// Supplied by the data table; read-only for the codec.
    pub time_display: TimeDisplay,
}

#[derive(Debug, Clone)]
pub struct Chart {
    pub config: ChartConfig,
    authored: ChartConfig,
    time_display: TimeDisplay,
    // Encoded value of each field the load query set explicitly
    loaded: BTreeMap<&'static str, String>,
    pub drop_unchanged_params: bool,
    pub debounce_mode: bool,
}

impl Chart {
    pub fn new(authored: ChartConfig, options: LoadOptions) -> Self {
        let mut chart = Self {
            config: authored.clone(),
            authored,
            time_display: options.time_display,
            loaded: BTreeMap::new(),
            drop_unchanged_params: true,
            debounce_mode: false,
        };

        if let Some(query_str) = options.query_str.as_deref() {
            let applied = chart.apply_query_params(str_to_query_params(query_str));
            chart.loaded = applied
                .into_iter()
                .filter_map(|field| Some((field.key, (field.encode)(&chart.config, chart.time_display)?)))
                .collect();
            debug!("Chart loaded with explicit params: {:?}", chart.loaded);
        }

        chart
    }

    pub fn time_display(&self) -> TimeDisplay {
        self.time_display
    }

    /// The configuration as authored, before any query string was applied.
    pub fn authored(&self) -> &ChartConfig {
        &self.authored
    }

    /// Query parameters for the current state. A parameter is omitted when
    /// dropping is on and the value matches the authored config, unless the
    /// load query asked for exactly this value.
    pub fn params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        for field in URL_FIELDS {
            let Some(current) = (field.encode)(&self.config, self.time_display) else {
                continue;
            };
            if self.drop_unchanged_params && !self.differs_from_baseline(field, &current) {
                continue;
            }
            params.insert(field.key.to_string(), current);
        }
        params
    }

    fn differs_from_baseline(&self, field: &UrlField, current: &str) -> bool {
        if self.loaded.get(field.key).map(String::as_str) == Some(current) {
            return true;
        }
        (field.encode)(&self.authored, self.time_display).as_deref() != Some(current)
    }

    pub fn query_str(&self) -> String {
        query_params_to_str(&self.params())
    }

    /// Applies an incoming mapping. Absent, empty or malformed values leave
    /// the corresponding field as it was.
    pub fn populate_from_query_params(&mut self, params: QueryParams) {
        self.apply_query_params(params);
    }

    fn apply_query_params(&mut self, params: QueryParams) -> Vec<&'static UrlField> {
        let params = legacy_to_current_query_params(params);
        let mut applied = Vec::new();

        for field in URL_FIELDS {
            let raw = std::iter::once(field.key)
                .chain(field.legacy_keys.iter().copied())
                .find_map(|key| params.get(key));
            let Some(raw) = raw.filter(|value| !value.is_empty()) else {
                continue;
            };

            match (field.apply)(&mut self.config, raw, self.time_display) {
                Ok(()) => applied.push(field),
                Err(e) => warn!("Ignoring query param {}={:?}: {}", field.key, raw, e),
            }
        }

        applied
    }

    /// `[start, end]` with unset sides read as unbounded.
    pub fn time_domain(&self) -> TimeBounds {
        [
            self.config.min_time.unwrap_or(UNBOUNDED_LEFT),
            self.config.max_time.unwrap_or(UNBOUNDED_RIGHT),
        ]
    }

    pub fn set_time_domain(&mut self, bounds: TimeBounds) {
        self.config.min_time = Some(bounds[0]);
        self.config.max_time = Some(bounds[1]);
    }

    pub fn base_url(&self) -> Option<String> {
        match (&self.config.slug, self.config.is_published) {
            (Some(slug), true) => Some(format!("{}/{}", GRAPHER_BASE_PATH, slug)),
            _ => None,
        }
    }

    pub fn url(&self) -> Option<String> {
        self.base_url().map(|base| format!("{}{}", base, self.query_str()))
    }

    pub fn start_playback(&mut self) {
        self.debounce_mode = true;
    }

    pub fn stop_playback(&mut self) {
        self.debounce_mode = false;
    }

    /// Advances the end of the time range (or the map time on the map tab) to
    /// the next of `available` times, wrapping to the first. A single-time
    /// range moves as a whole.
    pub fn step_time(&mut self, available: &[TimeBound]) -> Option<TimeBound> {
        let mut times = available.to_vec();
        times.sort_unstable();
        times.dedup();

        let current = match self.config.tab {
            Tab::Map => self.config.map.time.unwrap_or(UNBOUNDED_RIGHT),
            _ => self.time_domain()[1],
        };
        let next = times
            .iter()
            .copied()
            .find(|time| *time > current)
            .or_else(|| times.first().copied())?;

        if self.config.tab == Tab::Map {
            self.config.map.time = Some(next);
        } else {
            let [start, end] = self.time_domain();
            let start = if start == end { next } else { start.min(next) };
            self.set_time_domain([start, next]);
        }
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chart_config::ScaleType;

    fn authored_0_75() -> ChartConfig {
        ChartConfig {
            min_time: Some(0),
            max_time: Some(75),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_params_for_authored_state() {
        let chart = Chart::new(authored_0_75(), LoadOptions::default());
        assert!(chart.params().is_empty());
        assert_eq!(chart.query_str(), "");
    }

    #[test]
    fn test_drop_unchanged_params_toggle() {
        let mut chart = Chart::new(authored_0_75(), LoadOptions::default());
        assert_eq!(chart.params().get("time"), None);

        chart.drop_unchanged_params = false;
        let params = chart.params();
        assert_eq!(params.get("time").map(String::as_str), Some("0..75"));
        assert_eq!(params.get("tab").map(String::as_str), Some("chart"));
        // unset fields never appear
        assert_eq!(params.get("country"), None);
        assert_eq!(params.get("xScale"), None);
    }

    #[test]
    fn test_unset_min_matches_authored() {
        let chart = Chart::new(
            ChartConfig {
                max_time: Some(75),
                ..Default::default()
            },
            LoadOptions::default(),
        );
        assert_eq!(chart.params().get("time"), None);
    }

    #[test]
    fn test_changed_field_is_emitted() {
        let mut chart = Chart::new(authored_0_75(), LoadOptions::default());
        chart.set_time_domain([10, 20]);
        chart.config.stack_mode = crate::core::chart_config::StackMode::Relative;
        let params = chart.params();
        assert_eq!(params.get("time").map(String::as_str), Some("10..20"));
        assert_eq!(params.get("stackMode").map(String::as_str), Some("relative"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_explicit_default_is_retained() {
        let authored = ChartConfig {
            y_axis: crate::core::axis::AxisConfig {
                scale_type: ScaleType::Linear,
                can_change_scale_type: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let chart = Chart::new(
            authored.clone(),
            LoadOptions {
                query_str: Some("yScale=linear".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(chart.params().get("yScale").map(String::as_str), Some("linear"));

        let chart = Chart::new(authored, LoadOptions::default());
        assert_eq!(chart.params().get("yScale"), None);
    }

    #[test]
    fn test_legacy_scale_type_does_not_touch_x_axis() {
        let authored = ChartConfig {
            x_axis: crate::core::axis::AxisConfig {
                can_change_scale_type: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut chart = Chart::new(
            authored,
            LoadOptions {
                query_str: Some("scaleType=linear".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(chart.params().get("xScale"), None);
        chart.drop_unchanged_params = false;
        assert_eq!(chart.params().get("xScale").map(String::as_str), Some("linear"));
    }

    #[test]
    fn test_zoom_turned_off_is_emitted() {
        let mut chart = Chart::new(
            ChartConfig {
                zoom_to_selection: true,
                ..Default::default()
            },
            LoadOptions::default(),
        );
        assert_eq!(chart.params().get("zoomToSelection"), None);

        chart.config.zoom_to_selection = false;
        assert_eq!(chart.params().get("zoomToSelection").map(String::as_str), Some("false"));

        let mut reloaded = Chart::new(chart.config.clone(), LoadOptions::default());
        reloaded.config.zoom_to_selection = true;
        reloaded.populate_from_query_params(str_to_query_params(&chart.query_str()));
        assert!(!reloaded.config.zoom_to_selection);
    }

    #[test]
    fn test_map_tab_ignored_without_map() {
        let chart = Chart::new(
            ChartConfig::default(),
            LoadOptions {
                query_str: Some("tab=map".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(chart.config.tab, Tab::Chart);
        assert!(chart.params().is_empty());
    }

    #[test]
    fn test_empty_time_is_no_op() {
        let mut chart = Chart::new(
            ChartConfig {
                min_time: Some(0),
                max_time: Some(5),
                ..Default::default()
            },
            LoadOptions::default(),
        );
        chart.populate_from_query_params(str_to_query_params("time="));
        assert_eq!(chart.time_domain(), [0, 5]);
    }

    #[test]
    fn test_malformed_values_are_ignored() {
        let mut chart = Chart::new(authored_0_75(), LoadOptions::default());
        chart.populate_from_query_params(str_to_query_params("time=abc&tab=nowhere&stackMode=relative"));
        assert_eq!(chart.time_domain(), [0, 75]);
        assert_eq!(chart.config.tab, Tab::Chart);
        assert_eq!(chart.params().get("stackMode").map(String::as_str), Some("relative"));
    }

    #[test]
    fn test_base_url() {
        let chart = Chart::new(
            ChartConfig {
                slug: Some("foo".to_string()),
                is_published: true,
                ..Default::default()
            },
            LoadOptions::default(),
        );
        assert_eq!(chart.base_url().as_deref(), Some("/grapher/foo"));

        let mut chart = chart;
        chart.set_time_domain([2000, 2005]);
        assert_eq!(chart.url().as_deref(), Some("/grapher/foo?time=2000..2005"));

        let draft = Chart::new(ChartConfig::default(), LoadOptions::default());
        assert_eq!(draft.base_url(), None);
    }

    #[test]
    fn test_step_time_wraps() {
        let mut chart = Chart::new(
            ChartConfig {
                min_time: Some(2000),
                max_time: Some(2000),
                ..Default::default()
            },
            LoadOptions::default(),
        );
        let years = [2002, 2000, 2001];
        assert_eq!(chart.step_time(&years), Some(2001));
        assert_eq!(chart.time_domain(), [2001, 2001]);
        assert_eq!(chart.step_time(&years), Some(2002));
        assert_eq!(chart.step_time(&years), Some(2000));
        assert_eq!(chart.time_domain(), [2000, 2000]);
        assert_eq!(chart.step_time(&[]), None);
    }

    #[test]
    fn test_step_time_keeps_range_start() {
        let mut chart = Chart::new(
            ChartConfig {
                min_time: Some(1990),
                max_time: Some(2000),
                ..Default::default()
            },
            LoadOptions::default(),
        );
        assert_eq!(chart.step_time(&[1990, 2000, 2010]), Some(2010));
        assert_eq!(chart.time_domain(), [1990, 2010]);
    }

    #[test]
    fn test_playback_toggles_debounce_mode() {
        let mut chart = Chart::new(ChartConfig::default(), LoadOptions::default());
        assert!(!chart.debounce_mode);
        chart.start_playback();
        assert!(chart.debounce_mode);
        chart.stop_playback();
        assert!(!chart.debounce_mode);
    }
}
