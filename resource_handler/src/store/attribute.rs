use std::collections::HashMap;
use std::str::FromStr;
use aws_sdk_dynamodb::model::AttributeValue;
use serde_json::{Map, Number, Value};
use crate::error::{ResourceError, ResourceResult};
use crate::resource::{Resource, Timestamp, CREATED_DATE, FILES, METADATA, MODIFIED_DATE, OWNER, RESOURCE_IDENTIFIER};

pub type Item = HashMap<String, AttributeValue>;

pub fn encode_item(record: &Resource) -> ResourceResult<Item> {
    let identifier = record.resource_identifier.as_ref()
        .ok_or_else(|| ResourceError::store(format!("record has no {}", RESOURCE_IDENTIFIER)))?;
    let modified = record.modified_date
        .ok_or_else(|| ResourceError::store(format!("record {} has no {}", identifier, MODIFIED_DATE)))?;

    let mut item = HashMap::from([
        (String::from(RESOURCE_IDENTIFIER), AttributeValue::S(identifier.to_owned())),
        (String::from(MODIFIED_DATE), AttributeValue::S(modified.to_string())),
    ]);
    if let Some(created) = record.created_date {
        item.insert(String::from(CREATED_DATE), AttributeValue::S(created.to_string()));
    }
    if let Some(metadata) = &record.metadata {
        item.insert(String::from(METADATA), to_attribute(metadata));
    }
    if let Some(files) = &record.files {
        item.insert(String::from(FILES), to_attribute(files));
    }
    if let Some(owner) = &record.owner {
        item.insert(String::from(OWNER), AttributeValue::S(owner.to_owned()));
    }
    Ok(item)
}

pub fn decode_item(item: &Item) -> ResourceResult<Resource> {
    Ok(Resource {
        resource_identifier: decode_string(item, RESOURCE_IDENTIFIER)?,
        created_date: decode_timestamp(item, CREATED_DATE)?,
        modified_date: decode_timestamp(item, MODIFIED_DATE)?,
        metadata: item.get(METADATA).map(from_attribute),
        files: item.get(FILES).map(from_attribute),
        owner: decode_string(item, OWNER)?,
    })
}

/// Decodes a set of versions and orders them oldest first by the instant
/// they were modified. Stored sort keys need not share one rendering
/// (`..:02Z` and `..:02.5Z`), so their string order is not trusted.
pub fn decode_versions<'a, I>(items: I) -> ResourceResult<Vec<Resource>>
where
    I: IntoIterator<Item = &'a Item>,
{
    let mut versions = items.into_iter().map(decode_item).collect::<ResourceResult<Vec<_>>>()?;
    versions.sort_by_key(|v| v.modified_date);
    Ok(versions)
}

/// The primary key of a stored item, exactly as stored.
pub fn key_of(item: &Item) -> ResourceResult<Item> {
    let mut key = Item::new();
    for name in [RESOURCE_IDENTIFIER, MODIFIED_DATE] {
        let value = item.get(name)
            .ok_or_else(|| ResourceError::store(format!("item has no key attribute {}", name)))?;
        key.insert(name.to_owned(), value.clone());
    }
    Ok(key)
}

fn decode_string(item: &Item, name: &str) -> ResourceResult<Option<String>> {
    match item.get(name) {
        Some(AttributeValue::S(s)) => Ok(Some(s.to_owned())),
        Some(AttributeValue::Null(_)) | None => Ok(None),
        Some(other) => Err(ResourceError::store(format!("unexpected value for {}: {:?}", name, other))),
    }
}

fn decode_timestamp(item: &Item, name: &str) -> ResourceResult<Option<Timestamp>> {
    match decode_string(item, name)? {
        Some(s) => Timestamp::from_str(&s)
            .map(Some)
            .map_err(|e| ResourceError::store(format!("invalid {} {:?}: {}", name, s, e))),
        None => Ok(None),
    }
}

pub fn to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.to_owned()),
        Value::Array(values) => AttributeValue::L(values.iter().map(to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(
            map.iter().map(|(k, v)| (k.to_owned(), to_attribute(v))).collect()
        ),
    }
}

pub fn from_attribute(attribute: &AttributeValue) -> Value {
    match attribute {
        AttributeValue::S(s) => Value::String(s.to_owned()),
        AttributeValue::N(n) => number_value(n),
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::L(values) => Value::Array(values.iter().map(from_attribute).collect()),
        AttributeValue::M(map) => Value::Object(
            map.iter().map(|(k, v)| (k.to_owned(), from_attribute(v))).collect::<Map<String, Value>>()
        ),
        AttributeValue::Ss(values) => Value::Array(values.iter().map(|s| Value::String(s.to_owned())).collect()),
        AttributeValue::Ns(values) => Value::Array(values.iter().map(|n| number_value(n)).collect()),
        _ => Value::Null,
    }
}

fn number_value(n: &str) -> Value {
    if let Ok(i) = i64::from_str(n) {
        return Value::from(i);
    }
    if let Ok(u) = u64::from_str(n) {
        return Value::from(u);
    }
    match f64::from_str(n).ok().and_then(Number::from_f64) {
        Some(f) => Value::Number(f),
        None => Value::String(n.to_owned()),
    }
}
