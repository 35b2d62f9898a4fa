//! Strict decoding of the upstream series response.
//!
//! # Design Decisions
//! - Every field is required with its exact JSON type; serde does no coercion
//! - Unknown fields are ignored
//! - Object positions must hold JSON objects; positional arrays are rejected
//! - Errors carry the path of the failing value (`data.detail`,
//!   `data.items[3].video`, ...); a single bad item rejects the whole response

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::series::types::SchemaError;

/// Series metadata.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesDetail {
    pub title: String,
    pub thumbnail_url: String,
}

/// One entry of the series listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeriesItem {
    pub meta: ItemMeta,
    pub video: Video,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ItemMeta {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub title: String,
    /// Passed through to the feed untouched.
    pub registered_at: String,
    pub thumbnail: Thumbnail,
    pub short_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Thumbnail {
    #[serde(rename = "nHdUrl")]
    pub n_hd_url: String,
}

/// A fully validated page of the series listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesPage {
    pub detail: SeriesDetail,
    pub items: Vec<SeriesItem>,
}

/// Decode an upstream body into a [`SeriesPage`].
///
/// The body is walked as a [`Value`] so every object position can be checked
/// to really be a JSON object; serde-derived structs would otherwise also
/// accept a positional array.
pub fn decode_series(body: &[u8]) -> Result<SeriesPage, SchemaError> {
    let root: Value = serde_json::from_slice(body).map_err(|e| SchemaError::new("body", e))?;

    let mut root = into_object(root, "body")?;
    let data = take_field(&mut root, "body", "data")?;
    let mut data = into_object(data, "data")?;

    let detail = take_field(&mut data, "data", "detail")?;
    expect_object(&detail, "data.detail")?;
    let detail: SeriesDetail =
        serde_json::from_value(detail).map_err(|e| SchemaError::new("data.detail", e))?;

    let items = match take_field(&mut data, "data", "items")? {
        Value::Array(items) => items,
        other => {
            return Err(SchemaError::mismatch(
                "data.items",
                format!("invalid type: {}, expected an array", kind(&other)),
            ))
        }
    };

    let items = items
        .into_iter()
        .enumerate()
        .map(|(index, raw)| decode_item(raw, &format!("data.items[{index}]")))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SeriesPage { detail, items })
}

fn decode_item(raw: Value, path: &str) -> Result<SeriesItem, SchemaError> {
    let item = expect_object(&raw, path)?;
    if let Some(meta) = item.get("meta") {
        expect_object(meta, &format!("{path}.meta"))?;
    }
    if let Some(video) = item.get("video") {
        let video = expect_object(video, &format!("{path}.video"))?;
        if let Some(thumbnail) = video.get("thumbnail") {
            expect_object(thumbnail, &format!("{path}.video.thumbnail"))?;
        }
    }

    serde_json::from_value(raw).map_err(|e| SchemaError::new(path, e))
}

fn expect_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, SchemaError> {
    value.as_object().ok_or_else(|| {
        SchemaError::mismatch(
            path,
            format!("invalid type: {}, expected an object", kind(value)),
        )
    })
}

fn into_object(value: Value, path: &str) -> Result<Map<String, Value>, SchemaError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(SchemaError::mismatch(
            path,
            format!("invalid type: {}, expected an object", kind(&other)),
        )),
    }
}

fn take_field(
    object: &mut Map<String, Value>,
    path: &str,
    field: &str,
) -> Result<Value, SchemaError> {
    object
        .remove(field)
        .ok_or_else(|| SchemaError::mismatch(path, format!("missing field `{field}`")))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
