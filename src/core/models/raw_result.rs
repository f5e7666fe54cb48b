use std::fmt;

use serde_json::Value;

/// Whatever the model's inference entry point handed back, with no schema guarantee.
#[derive(Debug, Clone, PartialEq)]
pub enum RawResult {
    Absent,
    Text(String),
    Sequence(Vec<RawResult>),
    Mapping(Vec<(String, RawResult)>),
    Other(Value),
}

impl RawResult {
    pub fn get(&self, key: &str) -> Option<&RawResult> {
        match self {
            RawResult::Mapping(entries) => entries
                .iter()
                .find(|(entry_key, _)| entry_key == key)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            RawResult::Absent => "Absent",
            RawResult::Text(_) => "Text",
            RawResult::Sequence(_) => "Sequence",
            RawResult::Mapping(_) => "Mapping",
            RawResult::Other(_) => "Other",
        }
    }

    pub fn to_json_value(&self) -> Value {
        match self {
            RawResult::Absent => Value::Null,
            RawResult::Text(text) => Value::String(text.clone()),
            RawResult::Other(scalar) => scalar.clone(),
            RawResult::Sequence(items) => {
                Value::Array(items.iter().map(RawResult::to_json_value).collect())
            }
            RawResult::Mapping(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_json_value()))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for RawResult {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => RawResult::Absent,
            Value::String(text) => RawResult::Text(text),
            Value::Array(items) => {
                RawResult::Sequence(items.into_iter().map(RawResult::from).collect())
            }
            Value::Object(entries) => RawResult::Mapping(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, RawResult::from(value)))
                    .collect(),
            ),
            scalar @ (Value::Bool(_) | Value::Number(_)) => RawResult::Other(scalar),
        }
    }
}

impl From<&str> for RawResult {
    fn from(text: &str) -> Self {
        RawResult::Text(text.to_string())
    }
}

impl fmt::Display for RawResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawResult::Text(text) => write!(f, "{}", text),
            _ => write!(f, "{}", self.to_json_value()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_maps_every_value_kind() {
        let raw = RawResult::from(json!({
            "text": "hi",
            "lines": ["a", null],
            "score": 0.5,
            "done": true
        }));

        assert_eq!(
            raw,
            RawResult::Mapping(vec![
                ("text".to_string(), RawResult::from("hi")),
                (
                    "lines".to_string(),
                    RawResult::Sequence(vec![RawResult::from("a"), RawResult::Absent])
                ),
                ("score".to_string(), RawResult::Other(json!(0.5))),
                ("done".to_string(), RawResult::Other(json!(true))),
            ])
        );
    }

    #[test]
    fn test_get_returns_first_matching_key_only_for_mappings() {
        let mapping = RawResult::Mapping(vec![
            ("pred".to_string(), RawResult::from("B")),
            ("output_text".to_string(), RawResult::from("A")),
        ]);

        assert_eq!(mapping.get("output_text"), Some(&RawResult::from("A")));
        assert_eq!(mapping.get("missing"), None);
        assert_eq!(RawResult::from("A").get("output_text"), None);
    }

    #[test]
    fn test_display_keeps_mapping_key_order() {
        let mapping = RawResult::Mapping(vec![
            ("z".to_string(), RawResult::Other(json!(1))),
            ("a".to_string(), RawResult::Absent),
        ]);

        assert_eq!(mapping.to_string(), r#"{"z":1,"a":null}"#);
    }

    #[test]
    fn test_display_keeps_scalar_types_from_json() {
        let raw = RawResult::from(json!({"score": 0.9, "done": false, "label": "x"}));

        assert_eq!(raw.to_string(), r#"{"score":0.9,"done":false,"label":"x"}"#);
    }

    #[test]
    fn test_variant_name() {
        assert_eq!(RawResult::Absent.variant_name(), "Absent");
        assert_eq!(RawResult::Sequence(vec![]).variant_name(), "Sequence");
    }
}
