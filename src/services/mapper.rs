// src/services/mapper.rs

//! Field mapper.
//!
//! Projects an arbitrary JSON object onto the canonical fields. For each field
//! in priority order, the first alias present with a truthy value wins; every
//! key that no field claimed is carried over untouched into `others`.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::models::{CanonicalField, MappedFields, MappedValue, RAW_KEY};

/// Map `data` onto canonical fields.
///
/// Pure: reads `data` only, and the same input always yields the same output.
pub fn map_fields(data: &Value) -> MappedFields {
    let Some(object) = data.as_object() else {
        let mut others = Map::new();
        others.insert(RAW_KEY.to_string(), data.clone());
        return MappedFields {
            fields: Vec::new(),
            others,
        };
    };

    let mut fields = Vec::new();
    let mut claimed: HashSet<&str> = HashSet::new();

    for field in CanonicalField::ALL {
        let hit = field.aliases().iter().find_map(|alias| {
            object
                .get(*alias)
                .filter(|v| is_truthy(v))
                .map(|v| (*alias, v))
        });

        if let Some((key, value)) = hit {
            claimed.insert(key);
            fields.push(MappedValue {
                field,
                source_key: key.to_string(),
                value: value.clone(),
            });
        }
    }

    // Iterates in the source object's own key order.
    let others = object
        .iter()
        .filter(|(k, _)| !claimed.contains(k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    MappedFields { fields, others }
}

/// Whether a value counts as present for field selection.
///
/// `null`, `false`, zero, empty strings, empty arrays and empty objects do not.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
