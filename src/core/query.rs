// Query string <-> parameter mapping

use std::collections::BTreeMap;
use url::form_urlencoded;

/// Parameter name -> value. Sorted so encoded strings are deterministic.
pub type QueryParams = BTreeMap<String, String>;

/// Parses `?a=1&b=2` (leading `?` optional). Later duplicates win.
pub fn str_to_query_params(query: &str) -> QueryParams {
    let query = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(query.as_bytes()).into_owned().collect()
}

/// `?`-prefixed and percent-encoded; empty for an empty mapping.
pub fn query_params_to_str(params: &QueryParams) -> String {
    if params.is_empty() {
        return String::new();
    }
    let encoded = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter())
        .finish();
    format!("?{}", encoded)
}

/// Combines two query strings; parameters from `overrides` take precedence.
pub fn merge_query_str(base: Option<&str>, overrides: Option<&str>) -> String {
    let mut params = str_to_query_params(base.unwrap_or_default());
    params.extend(str_to_query_params(overrides.unwrap_or_default()));
    query_params_to_str(&params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_encode() {
        let params = str_to_query_params("?time=2000..2005&country=~GBR");
        assert_eq!(params.get("time").map(String::as_str), Some("2000..2005"));
        assert_eq!(params.get("country").map(String::as_str), Some("~GBR"));

        let encoded = query_params_to_str(&params);
        assert_eq!(str_to_query_params(&encoded), params);
    }

    #[test]
    fn test_escaping() {
        let mut params = QueryParams::new();
        params.insert("title".to_string(), "a&b=c d".to_string());
        let encoded = query_params_to_str(&params);
        assert!(!encoded.contains("a&b"));
        assert_eq!(str_to_query_params(&encoded), params);
    }

    #[test]
    fn test_empty() {
        assert_eq!(query_params_to_str(&QueryParams::new()), "");
        assert!(str_to_query_params("").is_empty());
        assert!(str_to_query_params("?").is_empty());
    }

    #[test]
    fn test_merge_overrides() {
        let merged = merge_query_str(
            Some("yScale=log&testsMetric=true&country=~GBR"),
            Some("country=GBR~ESP"),
        );
        let params = str_to_query_params(&merged);
        assert_eq!(params.get("yScale").map(String::as_str), Some("log"));
        assert_eq!(params.get("country").map(String::as_str), Some("GBR~ESP"));
        assert_eq!(merge_query_str(None, Some("")), "");
    }
}
