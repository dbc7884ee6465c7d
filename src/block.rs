//! Block export
//!
//! Walks a block and its nested block types recursively. A deprecated block
//! is reported as [`Marshaled::Omitted`] so the parent can drop the whole
//! block type entry instead of exporting an empty shell.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::attribute::{is_false, marshal_attribute, AttributeJson};
use crate::schema::{Block, NestedBlock};

/// Nested block type injected by the SDK for operation timeouts; never exported
pub const TIMEOUTS_BLOCK: &str = "timeouts";

/// Exported form of a block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockJson {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, AttributeJson>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub block_types: BTreeMap<String, BlockTypeJson>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description_kind: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub deprecated: bool,
}

/// Exported form of a nested block type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockTypeJson {
    pub nesting_mode: String,
    pub block: BlockJson,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub min_items: u64,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub max_items: u64,
}

fn is_zero(value: &u64) -> bool {
    *value == 0
}

/// Outcome of exporting a block
#[derive(Debug, Clone, PartialEq)]
pub enum Marshaled {
    Present(BlockJson),
    /// The block is deprecated; its containing entry must be dropped
    Omitted,
}

impl Marshaled {
    pub fn is_omitted(&self) -> bool {
        matches!(self, Marshaled::Omitted)
    }

    /// The exported block, if any
    pub fn into_block(self) -> Option<BlockJson> {
        match self {
            Marshaled::Present(block) => Some(block),
            Marshaled::Omitted => None,
        }
    }
}

/// Export a block. An absent block exports as an empty one.
pub fn marshal_block(block: Option<&Block>) -> Marshaled {
    let Some(block) = block else {
        return Marshaled::Present(BlockJson::default());
    };
    if block.deprecated {
        return Marshaled::Omitted;
    }

    let attributes = block
        .attributes
        .iter()
        .filter(|(_, attr)| !attr.deprecated)
        .map(|(name, attr)| (name.clone(), marshal_attribute(name, attr)))
        .collect();

    let mut block_types = BTreeMap::new();
    for (name, nested) in &block.block_types {
        if name == TIMEOUTS_BLOCK {
            continue;
        }
        match marshal_block_type(nested) {
            Some(block_type) => {
                block_types.insert(name.clone(), block_type);
            }
            None => debug!(block_type = %name, "dropping deprecated block type"),
        }
    }

    Marshaled::Present(BlockJson {
        attributes,
        block_types,
        description: block.description.clone(),
        description_kind: block.description_kind.clone(),
        deprecated: false,
    })
}

/// Export a nested block type, or `None` when its block is deprecated
pub fn marshal_block_type(nested: &NestedBlock) -> Option<BlockTypeJson> {
    let block = marshal_block(nested.block.as_ref()).into_block()?;

    Some(BlockTypeJson {
        nesting_mode: nested.nesting.as_str().to_string(),
        block,
        min_items: nested.min_items,
        max_items: nested.max_items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Attribute, NestingMode};
    use serde_json::json;

    fn optional(attribute_type: &str) -> Attribute {
        Attribute {
            optional: true,
            ..Attribute::new(attribute_type)
        }
    }

    #[test]
    fn test_absent_block_is_empty() {
        assert_eq!(marshal_block(None), Marshaled::Present(BlockJson::default()));
    }

    #[test]
    fn test_deprecated_block_omitted() {
        let block = Block {
            deprecated: true,
            ..Block::new().with_attribute("name", optional("string"))
        };
        assert!(marshal_block(Some(&block)).is_omitted());
    }

    #[test]
    fn test_reserved_and_plain_attributes() {
        let block = Block::new()
            .with_attribute("id", optional("string"))
            .with_attribute("name", optional("string"));

        let out = marshal_block(Some(&block)).into_block().unwrap();
        assert!(!out.attributes["id"].optional);
        assert!(out.attributes["name"].optional);

        let value = serde_json::to_value(&out).unwrap();
        assert!(value.get("block_types").is_none());
        assert_eq!(value["attributes"]["id"], json!({"type": "string", "required": true}));
    }

    #[test]
    fn test_deprecated_attribute_dropped() {
        let block = Block::new()
            .with_attribute("name", optional("string"))
            .with_attribute(
                "old_name",
                Attribute {
                    deprecated: true,
                    ..optional("string")
                },
            );

        let out = marshal_block(Some(&block)).into_block().unwrap();
        assert_eq!(out.attributes.len(), 1);
        assert!(out.attributes.contains_key("name"));
    }

    #[test]
    fn test_timeouts_discarded_at_every_depth() {
        let timeouts = NestedBlock::new(
            NestingMode::Single,
            Block::new().with_attribute("create", optional("string")),
        );
        let inner = Block::new()
            .with_attribute("port", optional("number"))
            .with_block_type(TIMEOUTS_BLOCK, timeouts.clone());
        let block = Block::new()
            .with_block_type("listener", NestedBlock::new(NestingMode::List, inner))
            .with_block_type(TIMEOUTS_BLOCK, timeouts);

        let out = marshal_block(Some(&block)).into_block().unwrap();
        assert!(!out.block_types.contains_key(TIMEOUTS_BLOCK));
        let listener = &out.block_types["listener"];
        assert!(listener.block.block_types.is_empty());

        // input is left untouched
        assert!(block.block_types.contains_key(TIMEOUTS_BLOCK));
    }

    #[test]
    fn test_deprecated_nested_block_drops_entry() {
        let old = Block {
            deprecated: true,
            ..Block::new()
        };
        let block = Block::new()
            .with_block_type("legacy", NestedBlock::new(NestingMode::Set, old))
            .with_block_type("tags", NestedBlock::new(NestingMode::Map, Block::new()));

        let out = marshal_block(Some(&block)).into_block().unwrap();
        assert!(!out.block_types.contains_key("legacy"));
        assert_eq!(out.block_types["tags"].nesting_mode, "map");
    }

    #[test]
    fn test_nesting_modes() {
        let cases = [
            (NestingMode::Single, "single"),
            (NestingMode::Group, "group"),
            (NestingMode::List, "list"),
            (NestingMode::Set, "set"),
            (NestingMode::Map, "map"),
            (NestingMode::Invalid, "invalid"),
        ];
        for (mode, expected) in cases {
            let out = marshal_block_type(&NestedBlock::new(mode, Block::new())).unwrap();
            assert_eq!(out.nesting_mode, expected);
        }
    }

    #[test]
    fn test_block_type_bounds_and_missing_child() {
        let nested = NestedBlock {
            nesting: NestingMode::List,
            block: None,
            min_items: 1,
            max_items: 5,
        };
        let out = marshal_block_type(&nested).unwrap();
        assert_eq!(out.block, BlockJson::default());
        assert_eq!(
            serde_json::to_value(&out).unwrap(),
            json!({"nesting_mode": "list", "block": {}, "min_items": 1, "max_items": 5})
        );
    }
}
