// Upgrade of older query parameter names

use crate::core::constants::{TIME_PARAM, YEAR_PARAM};
use crate::core::query::QueryParams;

/// Moves `year` onto `time` unless `time` is already set, in which case
/// `year` is discarded. The value is copied verbatim; it is parsed later.
pub fn legacy_to_current_query_params(mut params: QueryParams) -> QueryParams {
    if let Some(year) = params.remove(YEAR_PARAM) {
        params.entry(TIME_PARAM.to_string()).or_insert(year);
    }
    params
}
