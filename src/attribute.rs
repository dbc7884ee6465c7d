//! Attribute export

use serde::{Deserialize, Serialize};

use crate::schema::Attribute;

/// Attributes every resource carries whether or not the configuration sets
/// them. Exported as required at any depth.
pub const RESERVED_ATTRIBUTES: [&str; 3] = ["id", "region", "tenant_id"];

/// Exported form of a single attribute
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeJson {
    #[serde(rename = "type", default, skip_serializing_if = "serde_json::Value::is_null")]
    pub attribute_type: serde_json::Value,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description_kind: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub computed: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub sensitive: bool,
}

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

/// Whether `name` is one of the reserved identifiers
pub fn is_reserved(name: &str) -> bool {
    RESERVED_ATTRIBUTES.contains(&name)
}

/// Export one attribute. The caller has already filtered out deprecated
/// attributes.
pub fn marshal_attribute(name: &str, attr: &Attribute) -> AttributeJson {
    let reserved = is_reserved(name);

    AttributeJson {
        attribute_type: attr.attribute_type.clone(),
        description: attr.description.clone(),
        description_kind: attr.description_kind.clone(),
        required: attr.required || reserved,
        optional: attr.optional && !reserved,
        computed: attr.computed,
        sensitive: attr.sensitive,
    }
}
