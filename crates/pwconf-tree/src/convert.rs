//! Conversion from parsed JSON and TOML documents.
//!
//! An object carrying the reserved `_priority` key becomes an [`Entry`]. Its
//! content is `_content` when present, otherwise the object's other keys.
//! A null `_content` is rejected, as is `_priority` on the document root.

use crate::error::ConvertError;
use crate::path::KeyPath;
use crate::value::{ConfigTree, ConfigValue, Entry, Scalar};
use crate::{CONTENT_KEY, PRIORITY_KEY};

/// Convert a JSON document into a tree. The root must be an object.
pub fn tree_from_json(value: &serde_json::Value) -> Result<ConfigTree, ConvertError> {
    match value {
        serde_json::Value::Object(map) if map.contains_key(PRIORITY_KEY) => {
            Err(ConvertError::PriorityAtRoot)
        }
        serde_json::Value::Object(map) => json_object(map, &KeyPath::root()),
        other => Err(ConvertError::NotAnObject {
            found: json_kind(other),
        }),
    }
}

/// Convert a TOML table into a tree.
pub fn tree_from_toml(table: &toml::Table) -> Result<ConfigTree, ConvertError> {
    if table.contains_key(PRIORITY_KEY) {
        return Err(ConvertError::PriorityAtRoot);
    }
    toml_table(table, &KeyPath::root())
}

fn json_object(
    map: &serde_json::Map<String, serde_json::Value>,
    path: &KeyPath,
) -> Result<ConfigTree, ConvertError> {
    map.iter()
        .filter(|(key, _)| key.as_str() != PRIORITY_KEY)
        .map(|(key, value)| -> Result<(String, ConfigValue), ConvertError> {
            Ok((key.clone(), json_value(value, &path.child(key.as_str()))?))
        })
        .collect()
}

fn json_value(value: &serde_json::Value, path: &KeyPath) -> Result<ConfigValue, ConvertError> {
    let converted: ConfigValue = match value {
        serde_json::Value::Null => Scalar::Null.into(),
        serde_json::Value::Bool(b) => (*b).into(),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => i.into(),
            None => n.as_f64().unwrap_or(f64::NAN).into(),
        },
        serde_json::Value::String(s) => s.clone().into(),
        serde_json::Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| json_value(item, &path.child(format!("[{}]", i))))
            .collect::<Result<Vec<_>, _>>()?
            .into(),
        serde_json::Value::Object(map) => match map.get(PRIORITY_KEY) {
            Some(priority) => {
                let priority = priority
                    .as_i64()
                    .ok_or_else(|| ConvertError::InvalidPriority { path: path.clone() })?;
                let content = match map.get(CONTENT_KEY) {
                    Some(serde_json::Value::Null) => {
                        return Err(ConvertError::NullEntryContent { path: path.clone() });
                    }
                    Some(content) => json_value(content, path)?,
                    None => json_object(map, path)?.into(),
                };
                Entry::new(priority, content).into()
            }
            None => json_object(map, path)?.into(),
        },
    };
    Ok(converted)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

fn toml_table(table: &toml::Table, path: &KeyPath) -> Result<ConfigTree, ConvertError> {
    table
        .iter()
        .filter(|(key, _)| key.as_str() != PRIORITY_KEY)
        .map(|(key, value)| -> Result<(String, ConfigValue), ConvertError> {
            Ok((key.clone(), toml_value(value, &path.child(key.as_str()))?))
        })
        .collect()
}

fn toml_value(value: &toml::Value, path: &KeyPath) -> Result<ConfigValue, ConvertError> {
    let converted: ConfigValue = match value {
        toml::Value::String(s) => s.clone().into(),
        toml::Value::Integer(i) => (*i).into(),
        toml::Value::Float(f) => (*f).into(),
        toml::Value::Boolean(b) => (*b).into(),
        toml::Value::Datetime(dt) => dt.to_string().into(),
        toml::Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| toml_value(item, &path.child(format!("[{}]", i))))
            .collect::<Result<Vec<_>, _>>()?
            .into(),
        toml::Value::Table(table) => match table.get(PRIORITY_KEY) {
            Some(priority) => {
                let priority = priority
                    .as_integer()
                    .ok_or_else(|| ConvertError::InvalidPriority { path: path.clone() })?;
                let content = match table.get(CONTENT_KEY) {
                    Some(content) => toml_value(content, path)?,
                    None => toml_table(table, path)?.into(),
                };
                Entry::new(priority, content).into()
            }
            None => toml_table(table, path)?.into(),
        },
    };
    Ok(converted)
}
