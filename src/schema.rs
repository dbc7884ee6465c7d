//! Resolved schema types
//!
//! These mirror the schema tree a provider reports once it has been loaded:
//! blocks of attributes with recursively nested block types. Everything here
//! is input to the export and is only ever borrowed by it.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// How a nested block type repeats inside its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NestingMode {
    /// Exactly one nested block, may be absent
    Single,
    /// Exactly one nested block, never null
    Group,
    /// Ordered sequence of blocks
    List,
    /// Unordered set of blocks
    Set,
    /// Blocks keyed by a label
    Map,
    /// Anything the loader did not recognise
    #[default]
    #[serde(other)]
    Invalid,
}

impl NestingMode {
    /// Name used in the exported document
    pub fn as_str(&self) -> &'static str {
        match self {
            NestingMode::Single => "single",
            NestingMode::Group => "group",
            NestingMode::List => "list",
            NestingMode::Set => "set",
            NestingMode::Map => "map",
            NestingMode::Invalid => "invalid",
        }
    }
}

/// A leaf field of a block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// Type expression, kept opaque (e.g. `"string"`, `["list","number"]`)
    #[serde(rename = "type", default)]
    pub attribute_type: serde_json::Value,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_kind: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub computed: bool,
    #[serde(default)]
    pub sensitive: bool,
    #[serde(default)]
    pub deprecated: bool,
}

impl Attribute {
    /// Create an attribute of the given type with all flags unset
    pub fn new(attribute_type: impl Into<serde_json::Value>) -> Self {
        Self {
            attribute_type: attribute_type.into(),
            ..Default::default()
        }
    }
}

/// A nested block type: a child block plus how it repeats
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NestedBlock {
    #[serde(default)]
    pub nesting: NestingMode,
    /// Child block (absent is exported as an empty block)
    #[serde(default)]
    pub block: Option<Block>,
    #[serde(default)]
    pub min_items: u64,
    #[serde(default)]
    pub max_items: u64,
}

impl NestedBlock {
    /// Create a nested block type wrapping `block`
    pub fn new(nesting: NestingMode, block: Block) -> Self {
        Self {
            nesting,
            block: Some(block),
            min_items: 0,
            max_items: 0,
        }
    }

    /// Set the item count bounds
    pub fn with_items(mut self, min_items: u64, max_items: u64) -> Self {
        self.min_items = min_items;
        self.max_items = max_items;
        self
    }
}

/// A schema node holding attributes and nested block types
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub attributes: HashMap<String, Attribute>,
    #[serde(default)]
    pub block_types: HashMap<String, NestedBlock>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_kind: String,
    #[serde(default)]
    pub deprecated: bool,
}

impl Block {
    /// Create an empty block
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute
    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    /// Add a nested block type
    pub fn with_block_type(mut self, name: impl Into<String>, nested: NestedBlock) -> Self {
        self.block_types.insert(name.into(), nested);
        self
    }
}

/// Everything one provider reports about its schemas
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderSchema {
    /// Provider configuration block
    #[serde(default)]
    pub provider: Option<Block>,
    /// Resource type name -> block
    #[serde(default)]
    pub resource_types: Option<HashMap<String, Block>>,
    /// Resource type name -> schema version
    #[serde(default)]
    pub resource_type_schema_versions: HashMap<String, u64>,
    /// Data source type name -> block
    #[serde(default)]
    pub data_sources: Option<HashMap<String, Block>>,
    /// Data source type name -> schema version
    #[serde(default)]
    pub data_source_schema_versions: HashMap<String, u64>,
}

/// The full resolved schema set, keyed by provider identifier.
///
/// Kept ordered so providers are always exported in the same order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schemas {
    #[serde(rename = "provider_schemas", default)]
    pub providers: BTreeMap<String, ProviderSchema>,
}

impl Schemas {
    /// Parse a schema set from JSON text
    pub fn from_json(content: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a schema set from a JSON file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}
