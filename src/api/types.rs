use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Records keyed by card or effect id, in the order the API returned them.
pub type RecordMap = serde_json::Map<String, Value>;

/// Envelope of `GET /web/CardList/cardList`.
#[derive(Deserialize, Debug)]
pub struct CardListResponse {
    pub data: PagePayload,
}

/// One page of one class. `count` is the class total, not the page length.
///
/// Only the first page of a class has to report `count`; later pages may omit it.
#[derive(Deserialize, Debug)]
pub struct PagePayload {
    #[serde(default)]
    pub count: Option<i64>,
    #[serde(default, deserialize_with = "record_map")]
    pub cards: RecordMap,
    #[serde(default, deserialize_with = "record_map")]
    pub card_details: RecordMap,
    #[serde(default, deserialize_with = "record_map")]
    pub specific_effect_card_info: RecordMap,
    #[serde(flatten)]
    pub metadata: Metadata,
}

/// Lookup tables shared by every card, repeated on every page.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Metadata {
    #[serde(default = "empty_table", deserialize_with = "table")]
    pub tribe_names: Value,
    #[serde(default = "empty_table", deserialize_with = "table")]
    pub card_set_names: Value,
    #[serde(default = "empty_table", deserialize_with = "table")]
    pub skill_names: Value,
    #[serde(default = "empty_table", deserialize_with = "table")]
    pub skill_replace_text_names: Value,
    #[serde(default = "empty_table", deserialize_with = "table")]
    pub stats_list: Value,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            tribe_names: empty_table(),
            card_set_names: empty_table(),
            skill_names: empty_table(),
            skill_replace_text_names: empty_table(),
            stats_list: empty_table(),
        }
    }
}

fn empty_table() -> Value {
    Value::Object(RecordMap::new())
}

/// Tables are copied through untouched; only `null` is normalized to `{}`.
fn table<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Value, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(empty_table()),
        other => Ok(other),
    }
}

/// The API serializes an empty collection as `[]` instead of `{}`.
fn record_map<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RecordMap, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(RecordMap::new()),
        Value::Array(items) if items.is_empty() => Ok(RecordMap::new()),
        other => Err(D::Error::custom(format!(
            "expected a map of records, found {}",
            kind(&other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: Value) -> Result<CardListResponse, serde_json::Error> {
        serde_json::from_value(body)
    }

    #[test]
    fn absent_collections_are_empty() {
        let response = parse(json!({"data": {"count": 12}})).unwrap();
        assert_eq!(response.data.count, Some(12));
        assert!(response.data.cards.is_empty());
        assert!(response.data.card_details.is_empty());
        assert!(response.data.specific_effect_card_info.is_empty());
        assert_eq!(response.data.metadata, Metadata::default());
    }

    #[test]
    fn null_and_empty_array_collections_are_empty() {
        let response = parse(json!({
            "data": {
                "count": 0,
                "cards": null,
                "specific_effect_card_info": [],
                "tribe_names": null
            }
        }))
        .unwrap();
        assert!(response.data.cards.is_empty());
        assert!(response.data.specific_effect_card_info.is_empty());
        assert_eq!(response.data.metadata.tribe_names, json!({}));
    }

    #[test]
    fn records_keep_api_order() {
        let response = parse(json!({
            "data": {
                "count": 3,
                "card_details": {"30": {}, "10": {}, "20": {}}
            }
        }))
        .unwrap();
        let ids: Vec<&str> = response.data.card_details.keys().map(String::as_str).collect();
        assert_eq!(ids, ["30", "10", "20"]);
    }

    #[test]
    fn metadata_tables_are_copied_verbatim() {
        let response = parse(json!({
            "data": {
                "count": 1,
                "tribe_names": {"1": "Fairy"},
                "stats_list": [{"cost": 1}]
            }
        }))
        .unwrap();
        assert_eq!(response.data.metadata.tribe_names, json!({"1": "Fairy"}));
        assert_eq!(response.data.metadata.stats_list, json!([{"cost": 1}]));
    }

    #[test]
    fn missing_data_is_rejected() {
        assert!(parse(json!({"result": {}})).is_err());
        assert!(parse(json!({"data": null})).is_err());
    }

    #[test]
    fn count_may_be_absent_or_negative() {
        let response = parse(json!({"data": {"card_details": {"1": {}}}})).unwrap();
        assert_eq!(response.data.count, None);
        assert_eq!(response.data.card_details.len(), 1);

        let response = parse(json!({"data": {"count": -1}})).unwrap();
        assert_eq!(response.data.count, Some(-1));
    }

    #[test]
    fn non_map_collection_is_rejected() {
        let err = parse(json!({"data": {"count": 1, "cards": "oops"}})).unwrap_err();
        assert!(err.to_string().contains("found a string"), "got: {err}");
    }
}
