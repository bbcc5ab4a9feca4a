// Time bounds: sentinels, textual range parsing/formatting, day-mode dates

use crate::core::constants::*;
use crate::core::error::{ChartUrlError, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One endpoint of a time range: a year, a day offset, or a sentinel.
pub type TimeBound = i64;

/// `[start, end]`. Inverted or empty ranges are carried as given.
pub type TimeBounds = [TimeBound; 2];

/// How numeric times of the visualized column are written and read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeDisplay {
    #[default]
    Year,
    /// Days relative to 2020-01-21, written as `YYYY-MM-DD`.
    Day,
}

pub fn is_unbounded_left(bound: TimeBound) -> bool {
    bound <= UNBOUNDED_LEFT
}

pub fn is_unbounded_right(bound: TimeBound) -> bool {
    bound >= UNBOUNDED_RIGHT
}

pub fn is_unbounded(bound: TimeBound) -> bool {
    is_unbounded_left(bound) || is_unbounded_right(bound)
}

/// A parsed range plus whether formatting it reproduces the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedTimeRange {
    pub bounds: TimeBounds,
    pub reversible: bool,
}

pub fn date_to_day(date: NaiveDate) -> TimeBound {
    date.num_days_from_ce() as i64 - EPOCH_DAYS_FROM_CE
}

pub fn day_to_date(day: TimeBound) -> Option<NaiveDate> {
    let days = i32::try_from(day.checked_add(EPOCH_DAYS_FROM_CE)?).ok()?;
    NaiveDate::from_num_days_from_ce_opt(days)
}

/// Human label for a day offset, e.g. `Jan 21, 2020`. Dates are calendar
/// dates with no timezone, so the label never shifts with the host clock.
pub fn format_day(day: TimeBound) -> String {
    match day_to_date(day) {
        Some(date) => date.format(DISPLAY_DAY_FORMAT).to_string(),
        None => day.to_string(),
    }
}

fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    let bytes = text.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(text, ISO_DATE_FORMAT).ok()
}

fn parse_side(text: &str, mode: TimeDisplay) -> Result<Option<(TimeBound, bool)>> {
    match text {
        "" => return Ok(None),
        EARLIEST_KEYWORD => return Ok(Some((UNBOUNDED_LEFT, true))),
        LATEST_KEYWORD => return Ok(Some((UNBOUNDED_RIGHT, true))),
        _ => {}
    }

    if let Ok(value) = text.parse::<i64>() {
        if is_unbounded(value) {
            return Err(ChartUrlError::InvalidTimeBound(text.to_string()));
        }
        // Bare numbers in day mode are raw offsets; they re-encode as dates.
        let reversible = mode == TimeDisplay::Year && value.to_string() == text;
        return Ok(Some((value, reversible)));
    }

    if mode == TimeDisplay::Day {
        if let Some(date) = parse_iso_date(text) {
            return Ok(Some((date_to_day(date), true)));
        }
    }

    Err(ChartUrlError::InvalidTimeBound(text.to_string()))
}

/// Parses one side of a range. `Ok(None)` means "leave the bound as it is".
pub fn parse_time_bound(text: &str, mode: TimeDisplay) -> Result<Option<TimeBound>> {
    Ok(parse_side(text, mode)?.map(|(value, _)| value))
}

/// Parses `a..b`, a single value, or the legacy one-sided `a..` / `..b` forms.
/// `Ok(None)` for empty input.
pub fn parse_time_range_detailed(text: &str, mode: TimeDisplay) -> Result<Option<ParsedTimeRange>> {
    if text.is_empty() {
        return Ok(None);
    }

    let Some((left, right)) = text.split_once(RANGE_SEPARATOR) else {
        return Ok(parse_side(text, mode)?.map(|(value, reversible)| ParsedTimeRange {
            bounds: [value, value],
            reversible,
        }));
    };

    if right.contains(RANGE_SEPARATOR) {
        return Err(ChartUrlError::InvalidTimeRange(text.to_string()));
    }

    let (start, start_reversible) = parse_side(left, mode)?.unwrap_or((UNBOUNDED_LEFT, false));
    let (end, end_reversible) = parse_side(right, mode)?.unwrap_or((UNBOUNDED_RIGHT, false));

    Ok(Some(ParsedTimeRange {
        bounds: [start, end],
        // `x..x` formats back as plain `x`
        reversible: start_reversible && end_reversible && start != end,
    }))
}

pub fn parse_time_range(text: &str, mode: TimeDisplay) -> Result<Option<TimeBounds>> {
    Ok(parse_time_range_detailed(text, mode)?.map(|parsed| parsed.bounds))
}

pub fn format_time_bound(bound: TimeBound, mode: TimeDisplay) -> String {
    if is_unbounded_left(bound) {
        return EARLIEST_KEYWORD.to_string();
    }
    if is_unbounded_right(bound) {
        return LATEST_KEYWORD.to_string();
    }
    match mode {
        TimeDisplay::Year => bound.to_string(),
        TimeDisplay::Day => match day_to_date(bound) {
            Some(date) => date.format(ISO_DATE_FORMAT).to_string(),
            None => bound.to_string(),
        },
    }
}

pub fn format_time_range(bounds: TimeBounds, mode: TimeDisplay) -> String {
    let [start, end] = bounds;
    if start == end {
        return format_time_bound(start, mode);
    }
    format!(
        "{}{}{}",
        format_time_bound(start, mode),
        RANGE_SEPARATOR,
        format_time_bound(end, mode)
    )
}

/// JSON form of a bound inside chart configs: a number, or `"earliest"` / `"latest"`.
pub mod json {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawBound {
        Number(i64),
        Keyword(String),
    }

    fn from_raw<E: serde::de::Error>(raw: RawBound) -> std::result::Result<TimeBound, E> {
        match raw {
            RawBound::Number(value) => Ok(value),
            RawBound::Keyword(word) => match word.as_str() {
                EARLIEST_KEYWORD => Ok(UNBOUNDED_LEFT),
                LATEST_KEYWORD => Ok(UNBOUNDED_RIGHT),
                other => Err(E::custom(format!("unknown time bound keyword {other:?}"))),
            },
        }
    }

    pub fn serialize<S: Serializer>(bound: &Option<TimeBound>, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match bound {
            Some(b) if is_unbounded_left(*b) => serializer.serialize_str(EARLIEST_KEYWORD),
            Some(b) if is_unbounded_right(*b) => serializer.serialize_str(LATEST_KEYWORD),
            Some(b) => serializer.serialize_i64(*b),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<TimeBound>, D::Error> {
        Option::<RawBound>::deserialize(deserializer)?.map(from_raw).transpose()
    }
}
