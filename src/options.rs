//! Structured-option text decoding.
//!
//! Components accept free-form option text through a param port. The text, if
//! non-empty, must be a JSON object literal whose values are primitives
//! (bool, integer, float, string). Anything else — a parse error, a
//! non-object, a nested value — degrades to the empty mapping with a logged
//! warning. Option decoding never fails the pipeline.

use crate::types::SceneValue;
use std::collections::BTreeMap;

/// Keyed options forwarded to a host operation.
pub type OptionMap = BTreeMap<String, SceneValue>;

/// Decode option text into an [`OptionMap`], falling open to an empty map.
pub fn decode(text: &str) -> OptionMap {
    if text.trim().is_empty() {
        return OptionMap::new();
    }
    match serde_json::from_str::<OptionMap>(text) {
        Ok(map) => map,
        Err(err) => {
            tracing::warn!("ignoring malformed option text {:?}: {}", text, err);
            OptionMap::new()
        }
    }
}

/// Serialize an [`OptionMap`] back to its text form.
pub fn encode(map: &OptionMap) -> String {
    serde_json::to_string(map).unwrap_or_else(|_| String::from("{}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_well_formed() {
        let map = decode(r#"{"long": true, "depth": 2, "scale": 0.5, "type": "mesh"}"#);
        assert_eq!(map.len(), 4);
        assert_eq!(map.get("long"), Some(&SceneValue::Bool(true)));
        assert_eq!(map.get("depth"), Some(&SceneValue::Int(2)));
        assert_eq!(map.get("scale"), Some(&SceneValue::Float(0.5)));
        assert_eq!(map.get("type"), Some(&SceneValue::from("mesh")));
    }

    #[test]
    fn test_decode_empty_text() {
        assert!(decode("").is_empty());
        assert!(decode("   ").is_empty());
    }

    #[test]
    fn test_decode_malformed_is_empty_not_error() {
        assert!(decode("{not json").is_empty());
        assert!(decode("long=true").is_empty());
    }

    #[test]
    fn test_decode_non_mapping_is_empty() {
        assert!(decode("[1, 2, 3]").is_empty());
        assert!(decode("42").is_empty());
        assert!(decode(r#""just a string""#).is_empty());
    }

    #[test]
    fn test_decode_nested_value_rejects_whole_mapping() {
        assert!(decode(r#"{"a": 1, "b": [1, 2]}"#).is_empty());
        assert!(decode(r#"{"a": {"b": 1}}"#).is_empty());
        assert!(decode(r#"{"a": null}"#).is_empty());
    }

    #[test]
    fn test_round_trip() {
        let text = r#"{"depth": 2, "long": true, "name": "top", "scale": 1.5}"#;
        let map = decode(text);
        assert_eq!(map.len(), 4);
        let round_tripped = decode(&encode(&map));
        assert_eq!(map, round_tripped);
    }
}
