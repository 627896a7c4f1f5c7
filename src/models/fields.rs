//! Canonical output fields and the mapped view of a response.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

/// Key of the overflow bucket in serialized output.
pub const OTHERS_KEY: &str = "others";
/// Key a non-object payload is placed under inside `others`.
pub const RAW_KEY: &str = "raw";

/// Fields the mapper tries to populate, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CanonicalField {
    Name,
    Fname,
    Mobile,
    Alt,
    Email,
    Id,
    Circle,
    Address,
}

impl CanonicalField {
    /// All fields in mapping priority order.
    pub const ALL: [CanonicalField; 8] = [
        CanonicalField::Name,
        CanonicalField::Fname,
        CanonicalField::Mobile,
        CanonicalField::Alt,
        CanonicalField::Email,
        CanonicalField::Id,
        CanonicalField::Circle,
        CanonicalField::Address,
    ];

    /// Output key for this field.
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalField::Name => "name",
            CanonicalField::Fname => "fname",
            CanonicalField::Mobile => "mobile",
            CanonicalField::Alt => "alt",
            CanonicalField::Email => "email",
            CanonicalField::Id => "id",
            CanonicalField::Circle => "circle",
            CanonicalField::Address => "address",
        }
    }

    /// Source keys accepted for this field, tried in order.
    ///
    /// Alias sets are disjoint so a source key can only ever be claimed once.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            CanonicalField::Name => &["name", "fullname", "full_name", "user", "username"],
            CanonicalField::Fname => &["fname", "father_name", "fathername", "father", "parent"],
            CanonicalField::Mobile => &["mobile", "phone", "number", "mobile_no", "msisdn"],
            CanonicalField::Alt => &["alt", "alt_mobile", "alt_number", "alternate", "alt_phone"],
            CanonicalField::Email => &["email", "mail", "email_id"],
            CanonicalField::Id => &["id", "uid", "user_id", "id_number"],
            CanonicalField::Circle => &["circle", "region", "area", "operator"],
            CanonicalField::Address => &["address", "location", "addr"],
        }
    }

    /// Human label for summary cards.
    pub fn label(&self) -> &'static str {
        match self {
            CanonicalField::Name => "Name",
            CanonicalField::Fname => "Fname",
            CanonicalField::Mobile => "Mobile",
            CanonicalField::Alt => "Alt",
            CanonicalField::Email => "Email",
            CanonicalField::Id => "Id",
            CanonicalField::Circle => "Circle",
            CanonicalField::Address => "Address",
        }
    }

    /// Look a field up by its output key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == key)
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A canonical field together with the value and the key it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedValue {
    pub field: CanonicalField,
    pub source_key: String,
    pub value: Value,
}

/// Best-effort canonical view of a response.
///
/// Serializes as a flat object: canonical fields in priority order, then
/// `others` when it is non-empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MappedFields {
    pub(crate) fields: Vec<MappedValue>,
    pub(crate) others: Map<String, Value>,
}

impl MappedFields {
    /// Canonical fields that were populated, in priority order.
    pub fn fields(&self) -> &[MappedValue] {
        &self.fields
    }

    /// Value mapped for `field`, if any.
    pub fn get(&self, field: CanonicalField) -> Option<&Value> {
        self.fields
            .iter()
            .find(|m| m.field == field)
            .map(|m| &m.value)
    }

    /// Unmapped keys, or `None` when everything was claimed.
    pub fn others(&self) -> Option<&Map<String, Value>> {
        if self.others.is_empty() {
            None
        } else {
            Some(&self.others)
        }
    }

    /// Flat JSON rendering of the mapping.
    pub fn to_value(&self) -> Value {
        let mut out = Map::new();
        for m in &self.fields {
            out.insert(m.field.as_str().to_string(), m.value.clone());
        }
        if let Some(others) = self.others() {
            out.insert(OTHERS_KEY.to_string(), Value::Object(others.clone()));
        }
        Value::Object(out)
    }
}

impl Serialize for MappedFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let others = self.others();
        let len = self.fields.len() + usize::from(others.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        for m in &self.fields {
            map.serialize_entry(m.field.as_str(), &m.value)?;
        }
        if let Some(others) = others {
            map.serialize_entry(OTHERS_KEY, others)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn alias_sets_are_disjoint() {
        let mut seen = HashSet::new();
        for field in CanonicalField::ALL {
            for alias in field.aliases() {
                assert!(seen.insert(*alias), "alias {alias} claimed twice");
            }
        }
    }

    #[test]
    fn every_field_accepts_its_own_name() {
        for field in CanonicalField::ALL {
            assert!(field.aliases().contains(&field.as_str()));
            assert_eq!(CanonicalField::from_key(field.as_str()), Some(field));
        }
    }

    #[test]
    fn label_capitalizes_key() {
        for field in CanonicalField::ALL {
            let key = field.as_str();
            let expected = format!("{}{}", key[..1].to_uppercase(), &key[1..]);
            assert_eq!(field.label(), expected);
        }
    }
}
