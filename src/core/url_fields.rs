// Table of chart fields that have a query-string representation.
//
// Each entry knows how to encode its field from a config and how to apply a
// raw value back onto one. The diff/omit logic in `chart.rs` only walks this
// table, so a new key is one more entry here.

use crate::core::chart_config::{ChartConfig, MapProjection, ScaleType, StackMode, Tab};
use crate::core::constants::*;
use crate::core::error::{ChartUrlError, Result};
use crate::core::time_bounds::{format_time_bound, format_time_range, parse_time_range, TimeDisplay};

pub type EncodeFn = fn(&ChartConfig, TimeDisplay) -> Option<String>;
pub type ApplyFn = fn(&mut ChartConfig, &str, TimeDisplay) -> Result<()>;

pub struct UrlField {
    pub key: &'static str,
    /// Older names read when `key` itself is absent. Never written.
    pub legacy_keys: &'static [&'static str],
    /// `None` when the field is unset; such a field never becomes a parameter.
    pub encode: EncodeFn,
    /// Only called with non-empty values. Must not modify `config` on error.
    pub apply: ApplyFn,
}

pub static URL_FIELDS: &[UrlField] = &[
    UrlField { key: TAB_PARAM, legacy_keys: &[], encode: encode_tab, apply: apply_tab },
    UrlField { key: OVERLAY_PARAM, legacy_keys: &[], encode: encode_overlay, apply: apply_overlay },
    UrlField { key: STACK_MODE_PARAM, legacy_keys: &[], encode: encode_stack_mode, apply: apply_stack_mode },
    UrlField {
        key: ZOOM_TO_SELECTION_PARAM,
        legacy_keys: &[],
        encode: encode_zoom_to_selection,
        apply: apply_zoom_to_selection,
    },
    UrlField {
        key: MIN_POPULATION_FILTER_PARAM,
        legacy_keys: &[],
        encode: encode_min_population_filter,
        apply: apply_min_population_filter,
    },
    UrlField { key: X_SCALE_PARAM, legacy_keys: &[], encode: encode_x_scale, apply: apply_x_scale },
    UrlField {
        key: Y_SCALE_PARAM,
        legacy_keys: &[LEGACY_SCALE_TYPE_PARAM],
        encode: encode_y_scale,
        apply: apply_y_scale,
    },
    UrlField {
        key: ENDPOINTS_ONLY_PARAM,
        legacy_keys: &[],
        encode: encode_endpoints_only,
        apply: apply_endpoints_only,
    },
    UrlField { key: TIME_PARAM, legacy_keys: &[], encode: encode_time, apply: apply_time },
    UrlField { key: REGION_PARAM, legacy_keys: &[], encode: encode_region, apply: apply_region },
    UrlField { key: COUNTRY_PARAM, legacy_keys: &[], encode: encode_country, apply: apply_country },
];

pub fn find_field(key: &str) -> Option<&'static UrlField> {
    URL_FIELDS.iter().find(|field| field.key == key)
}

fn invalid(key: &'static str, value: &str) -> ChartUrlError {
    ChartUrlError::InvalidQuery {
        key,
        value: value.to_string(),
    }
}

fn encode_tab(config: &ChartConfig, _: TimeDisplay) -> Option<String> {
    Some(config.tab.as_str().to_string())
}

fn apply_tab(config: &mut ChartConfig, value: &str, _: TimeDisplay) -> Result<()> {
    let tab = value.parse::<Tab>()?;
    if tab == Tab::Map && !config.has_map_tab {
        return Err(invalid(TAB_PARAM, value));
    }
    config.tab = tab;
    Ok(())
}

fn encode_overlay(config: &ChartConfig, _: TimeDisplay) -> Option<String> {
    config.overlay.map(|tab| tab.as_str().to_string())
}

fn apply_overlay(config: &mut ChartConfig, value: &str, _: TimeDisplay) -> Result<()> {
    config.overlay = Some(value.parse::<Tab>()?);
    Ok(())
}

fn encode_stack_mode(config: &ChartConfig, _: TimeDisplay) -> Option<String> {
    Some(config.stack_mode.as_str().to_string())
}

fn apply_stack_mode(config: &mut ChartConfig, value: &str, _: TimeDisplay) -> Result<()> {
    config.stack_mode = value.parse::<StackMode>()?;
    Ok(())
}

fn encode_zoom_to_selection(config: &ChartConfig, _: TimeDisplay) -> Option<String> {
    Some(config.zoom_to_selection.to_string())
}

fn apply_zoom_to_selection(config: &mut ChartConfig, value: &str, _: TimeDisplay) -> Result<()> {
    match value {
        "true" => config.zoom_to_selection = true,
        "false" => config.zoom_to_selection = false,
        _ => return Err(invalid(ZOOM_TO_SELECTION_PARAM, value)),
    }
    Ok(())
}

fn encode_min_population_filter(config: &ChartConfig, _: TimeDisplay) -> Option<String> {
    config.min_population_filter.map(|filter| filter.to_string())
}

fn apply_min_population_filter(config: &mut ChartConfig, value: &str, _: TimeDisplay) -> Result<()> {
    let filter = value
        .parse::<i64>()
        .map_err(|_| invalid(MIN_POPULATION_FILTER_PARAM, value))?;
    config.min_population_filter = Some(filter);
    Ok(())
}

// Scale params only exist for axes whose scale the reader may toggle.
fn encode_x_scale(config: &ChartConfig, _: TimeDisplay) -> Option<String> {
    let axis = &config.x_axis;
    axis.can_change_scale_type.then(|| axis.scale_type.as_str().to_string())
}

fn apply_x_scale(config: &mut ChartConfig, value: &str, _: TimeDisplay) -> Result<()> {
    config.x_axis.scale_type = value.parse::<ScaleType>()?;
    Ok(())
}

fn encode_y_scale(config: &ChartConfig, _: TimeDisplay) -> Option<String> {
    let axis = &config.y_axis;
    axis.can_change_scale_type.then(|| axis.scale_type.as_str().to_string())
}

fn apply_y_scale(config: &mut ChartConfig, value: &str, _: TimeDisplay) -> Result<()> {
    config.y_axis.scale_type = value.parse::<ScaleType>()?;
    Ok(())
}

fn encode_endpoints_only(config: &ChartConfig, _: TimeDisplay) -> Option<String> {
    Some(if config.compare_end_points_only { "1" } else { "0" }.to_string())
}

fn apply_endpoints_only(config: &mut ChartConfig, value: &str, _: TimeDisplay) -> Result<()> {
    match value {
        "1" => config.compare_end_points_only = true,
        "0" => config.compare_end_points_only = false,
        _ => return Err(invalid(ENDPOINTS_ONLY_PARAM, value)),
    }
    Ok(())
}

/// On the map tab `time` is the map's single time; elsewhere it is the
/// `[minTime, maxTime]` range with unset sides read as unbounded.
fn encode_time(config: &ChartConfig, mode: TimeDisplay) -> Option<String> {
    if config.tab == Tab::Map {
        return config.map.time.map(|time| format_time_bound(time, mode));
    }
    if config.min_time.is_none() && config.max_time.is_none() {
        return None;
    }
    let start = config.min_time.unwrap_or(UNBOUNDED_LEFT);
    let end = config.max_time.unwrap_or(UNBOUNDED_RIGHT);
    Some(format_time_range([start, end], mode))
}

fn apply_time(config: &mut ChartConfig, value: &str, mode: TimeDisplay) -> Result<()> {
    if let Some([start, end]) = parse_time_range(value, mode)? {
        config.min_time = Some(start);
        config.max_time = Some(end);
        config.map.time = Some(end);
    }
    Ok(())
}

fn encode_region(config: &ChartConfig, _: TimeDisplay) -> Option<String> {
    Some(config.map.projection.as_str().to_string())
}

fn apply_region(config: &mut ChartConfig, value: &str, _: TimeDisplay) -> Result<()> {
    config.map.projection = value.parse::<MapProjection>()?;
    Ok(())
}

/// `GBR~ESP`; a lone entity is written `~GBR` so it is never read as the
/// legacy `+`-separated form.
fn encode_country(config: &ChartConfig, _: TimeDisplay) -> Option<String> {
    match config.selected_entity_codes.as_slice() {
        [] => None,
        [single] => Some(format!("{}{}", ENTITY_SEPARATOR, single)),
        many => Some(many.join(ENTITY_SEPARATOR.to_string().as_str())),
    }
}

fn apply_country(config: &mut ChartConfig, value: &str, _: TimeDisplay) -> Result<()> {
    let codes: Vec<String> = if value.contains(ENTITY_SEPARATOR) {
        value
            .split(ENTITY_SEPARATOR)
            .filter(|code| !code.is_empty())
            .map(str::to_string)
            .collect()
    } else {
        // Legacy: `GBR+ESP`, which form decoding already turned into `GBR ESP`
        value
            .split(|c: char| c == '+' || c.is_whitespace())
            .filter(|code| !code.is_empty())
            .map(str::to_string)
            .collect()
    };
    if codes.is_empty() {
        return Err(invalid(COUNTRY_PARAM, value));
    }
    config.selected_entity_codes = codes;
    Ok(())
}
