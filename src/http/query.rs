//! Query-string rendering
//!
//! Follows the `qs` stringify conventions the upstream expects: RFC 3986
//! percent-encoding of keys and values, `null` rendered as an empty value,
//! arrays as indexed brackets and nested objects as named brackets. Empty
//! arrays and objects contribute nothing.

use super::request::QueryParams;
use crate::types::JsonValue;

/// Render parameters as `k=v&k2=v2`
pub fn stringify(params: &QueryParams) -> String {
    let mut pairs = Vec::with_capacity(params.len());
    for (key, value) in params.iter() {
        push_pairs(&mut pairs, key.to_string(), value);
    }
    pairs.join("&")
}

fn push_pairs(pairs: &mut Vec<String>, prefix: String, value: &JsonValue) {
    match value {
        JsonValue::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                push_pairs(pairs, format!("{prefix}[{index}]"), item);
            }
        }
        JsonValue::Object(map) => {
            for (key, item) in map {
                push_pairs(pairs, format!("{prefix}[{key}]"), item);
            }
        }
        scalar => pairs.push(format!(
            "{}={}",
            urlencoding::encode(&prefix),
            urlencoding::encode(&scalar_to_string(scalar))
        )),
    }
}

fn scalar_to_string(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.clone(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Number(n) => n.to_string(),
        // Containers are expanded by push_pairs before reaching here
        other => other.to_string(),
    }
}

#[cfg(test)]
mod query_tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars_in_insertion_order() {
        let params = QueryParams::new()
            .with("limit", 200)
            .with("includePlaceholders", true)
            .with("modifiedAfter", "2024-11-28");
        assert_eq!(
            stringify(&params),
            "limit=200&includePlaceholders=true&modifiedAfter=2024-11-28"
        );
    }

    #[test]
    fn test_null_renders_empty_value() {
        let params = QueryParams::new()
            .with("limit", 200)
            .with("cursor", JsonValue::Null);
        assert_eq!(stringify(&params), "limit=200&cursor=");
    }

    #[test]
    fn test_values_are_rfc3986_encoded() {
        let params = QueryParams::new()
            .with("cursor", "a b/c+d")
            .with("since", "2024-11-28T15:43:32Z");
        assert_eq!(
            stringify(&params),
            "cursor=a%20b%2Fc%2Bd&since=2024-11-28T15%3A43%3A32Z"
        );
    }

    #[test]
    fn test_arrays_use_indexed_brackets() {
        let params = QueryParams::new().with("ids", json!([3, 5]));
        assert_eq!(stringify(&params), "ids%5B0%5D=3&ids%5B1%5D=5");
    }

    #[test]
    fn test_nested_objects_use_named_brackets() {
        let params = QueryParams::new().with("filter", json!({"name": "Ada", "tags": ["x"]}));
        assert_eq!(
            stringify(&params),
            "filter%5Bname%5D=Ada&filter%5Btags%5D%5B0%5D=x"
        );
    }

    #[test]
    fn test_empty_containers_are_skipped() {
        let params = QueryParams::new()
            .with("ids", json!([]))
            .with("meta", json!({}))
            .with("limit", 5);
        assert_eq!(stringify(&params), "limit=5");
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut params = QueryParams::new().with("limit", 200).with("cursor", JsonValue::Null);
        params.extend(&QueryParams::new().with("limit", 500));
        assert_eq!(stringify(&params), "limit=500&cursor=");
    }
}
