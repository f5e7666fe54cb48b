use crate::core::models::RawResult;
use crate::global_constants::RESULT_KEY_PRIORITY;

pub fn normalize_raw_result(raw: &RawResult) -> String {
    match raw {
        RawResult::Absent => String::new(),
        RawResult::Text(text) => text.clone(),
        RawResult::Sequence(items) => normalize_sequence(items),
        RawResult::Mapping(_) => normalize_mapping(raw),
        RawResult::Other(scalar) => scalar.to_string(),
    }
}

fn normalize_sequence(items: &[RawResult]) -> String {
    let normalized: Vec<String> = items.iter().map(normalize_raw_result).collect();

    if let Some(first_hit) = normalized.iter().find(|text| !text.is_empty()) {
        return first_hit.clone();
    }

    normalized
        .into_iter()
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn normalize_mapping(mapping: &RawResult) -> String {
    RESULT_KEY_PRIORITY
        .iter()
        .filter_map(|key| mapping.get(key))
        .map(normalize_raw_result)
        .find(|text| !text.is_empty())
        .unwrap_or_else(|| mapping.to_string())
}
