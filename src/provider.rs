//! Document assembly
//!
//! Builds the top-level `provider_schemas` document for one selection:
//! the provider configuration block, resource types, or data sources, either
//! all of them or a single named type.

use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use tracing::debug;

use crate::block::{marshal_block, BlockJson};
use crate::config::{ExportConfig, OutputFormat};
use crate::error::Result;
use crate::product::{marshal_product, ProductJson};
use crate::schema::{Block, ProviderSchema, Schemas};

/// Name that selects every resource or data source
pub const ALL: &str = "all";

/// Which schema group is exported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// Provider configuration block
    #[default]
    Provider,
    Resource,
    DataSource,
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceType::Provider => write!(f, "provider"),
            SourceType::Resource => write!(f, "resource"),
            SourceType::DataSource => write!(f, "data source"),
        }
    }
}

/// Which entries of a resource or data source group are exported
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    All,
    Named(String),
}

impl Target {
    /// `"all"` selects everything, anything else is an exact type name
    pub fn parse(name: &str) -> Self {
        if name == ALL {
            Target::All
        } else {
            Target::Named(name.to_string())
        }
    }
}

/// A schema group plus the entries to take from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub source_type: SourceType,
    pub target: Target,
}

impl Selection {
    /// Export the provider configuration block
    pub fn provider() -> Self {
        Self {
            source_type: SourceType::Provider,
            target: Target::All,
        }
    }

    /// Export resource types matching `name` (`"all"` for every type)
    pub fn resource(name: &str) -> Self {
        Self {
            source_type: SourceType::Resource,
            target: Target::parse(name),
        }
    }

    /// Export data sources matching `name` (`"all"` for every type)
    pub fn data_source(name: &str) -> Self {
        Self {
            source_type: SourceType::DataSource,
            target: Target::parse(name),
        }
    }
}

/// Top-level exported document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProvidersJson {
    #[serde(rename = "provider_schemas", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub schemas: BTreeMap<String, ProviderJson>,
}

/// Exported schemas of one provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<SchemaJson>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub resource_schemas: BTreeMap<String, SchemaJson>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data_source_schemas: BTreeMap<String, SchemaJson>,
}

/// Exported schema: a block with its version and derived product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaJson {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub version: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<BlockJson>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductJson>,
}

fn is_zero(value: &u64) -> bool {
    *value == 0
}

/// Export a schema set to JSON text with the default configuration
pub fn marshal(schemas: &Schemas, selection: &Selection) -> Result<String> {
    marshal_with(schemas, selection, &ExportConfig::default())
}

/// Export a schema set to JSON text
pub fn marshal_with(
    schemas: &Schemas,
    selection: &Selection,
    config: &ExportConfig,
) -> Result<String> {
    let document = marshal_document(schemas, selection, config);
    let json = match config.output.format {
        OutputFormat::Pretty => serde_json::to_string_pretty(&document)?,
        OutputFormat::Compact => serde_json::to_string(&document)?,
    };
    Ok(json)
}

/// Build the export document without serializing it.
///
/// Providers are visited in identifier order. When two identifiers share a
/// key once the namespace prefix is stripped, the first one wins.
pub fn marshal_document(
    schemas: &Schemas,
    selection: &Selection,
    config: &ExportConfig,
) -> ProvidersJson {
    let mut document = ProvidersJson::default();

    for (id, provider_schema) in &schemas.providers {
        let key = config.provider_key(id);
        let Entry::Vacant(slot) = document.schemas.entry(key.to_string()) else {
            debug!(provider = %id, key = %key, "dropping provider with duplicate key");
            continue;
        };
        debug!(provider = %key, source_type = %selection.source_type, "exporting provider schemas");

        let provider = match selection.source_type {
            SourceType::Provider => marshal_provider(provider_schema),
            SourceType::Resource => ProviderJson {
                resource_schemas: provider_schema
                    .resource_types
                    .as_ref()
                    .map(|types| {
                        marshal_schemas(
                            types,
                            &provider_schema.resource_type_schema_versions,
                            &selection.target,
                        )
                    })
                    .unwrap_or_default(),
                ..Default::default()
            },
            SourceType::DataSource => ProviderJson {
                data_source_schemas: provider_schema
                    .data_sources
                    .as_ref()
                    .map(|types| {
                        marshal_schemas(
                            types,
                            &provider_schema.data_source_schema_versions,
                            &selection.target,
                        )
                    })
                    .unwrap_or_default(),
                ..Default::default()
            },
        };

        slot.insert(provider);
    }

    document
}

fn marshal_provider(provider_schema: &ProviderSchema) -> ProviderJson {
    ProviderJson {
        provider: provider_schema.provider.as_ref().map(marshal_schema),
        ..Default::default()
    }
}

/// Export one block as a schema; the caller sets the version
pub fn marshal_schema(block: &Block) -> SchemaJson {
    SchemaJson {
        block: marshal_block(Some(block)).into_block(),
        ..Default::default()
    }
}

/// Export the entries of a resource or data source group selected by `target`
pub fn marshal_schemas(
    blocks: &HashMap<String, Block>,
    versions: &HashMap<String, u64>,
    target: &Target,
) -> BTreeMap<String, SchemaJson> {
    let versioned = |name: &str, block: &Block| SchemaJson {
        version: versions.get(name).copied().unwrap_or_default(),
        ..marshal_schema(block)
    };

    match target {
        Target::All => blocks
            .iter()
            .map(|(name, block)| (name.clone(), versioned(name, block)))
            .collect(),
        Target::Named(name) => {
            let Some(block) = blocks.get(name) else {
                debug!(type_name = %name, "no schema with this name");
                return BTreeMap::new();
            };
            let schema = SchemaJson {
                product: marshal_product(name),
                ..versioned(name, block)
            };
            BTreeMap::from([(name.clone(), schema)])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Attribute;

    fn provider_schema() -> ProviderSchema {
        let bucket = Block::new().with_attribute("bucket", Attribute::new("string"));
        let vpc = Block::new().with_attribute("cidr", Attribute::new("string"));
        ProviderSchema {
            provider: Some(Block::new().with_attribute("region", Attribute::new("string"))),
            resource_types: Some(HashMap::from([
                ("cloud_obs_bucket".to_string(), bucket.clone()),
                ("cloud_vpc".to_string(), vpc.clone()),
            ])),
            resource_type_schema_versions: HashMap::from([("cloud_obs_bucket".to_string(), 2)]),
            data_sources: Some(HashMap::from([("cloud_vpc".to_string(), vpc)])),
            data_source_schema_versions: HashMap::from([("cloud_vpc".to_string(), 1)]),
        }
    }

    fn schemas() -> Schemas {
        Schemas {
            providers: BTreeMap::from([(
                "local-registry/example/cloud".to_string(),
                provider_schema(),
            )]),
        }
    }

    fn export(selection: &Selection) -> ProvidersJson {
        marshal_document(&schemas(), selection, &ExportConfig::default())
    }

    #[test]
    fn test_target_parse() {
        assert_eq!(Target::parse("all"), Target::All);
        assert_eq!(Target::parse("All"), Target::Named("All".to_string()));
    }

    #[test]
    fn test_provider_mode() {
        let doc = export(&Selection::provider());
        let provider = &doc.schemas["example/cloud"];
        let schema = provider.provider.as_ref().unwrap();
        assert_eq!(schema.version, 0);
        assert!(schema.product.is_none());
        assert!(schema.block.as_ref().unwrap().attributes["region"].required);
        assert!(provider.resource_schemas.is_empty());
        assert!(provider.data_source_schemas.is_empty());
    }

    #[test]
    fn test_resource_all_has_no_product() {
        let doc = export(&Selection::resource("all"));
        let resources = &doc.schemas["example/cloud"].resource_schemas;
        assert_eq!(resources.len(), 2);
        assert_eq!(resources["cloud_obs_bucket"].version, 2);
        assert_eq!(resources["cloud_vpc"].version, 0);
        assert!(resources.values().all(|s| s.product.is_none()));
    }

    #[test]
    fn test_resource_by_name() {
        let doc = export(&Selection::resource("cloud_vpc"));
        let resources = &doc.schemas["example/cloud"].resource_schemas;
        assert_eq!(resources.len(), 1);
        let product = resources["cloud_vpc"].product.as_ref().unwrap();
        assert_eq!(product.short, "VPC");
        assert_eq!(product.catalog, "Network");
    }

    #[test]
    fn test_name_is_exact_match() {
        let doc = export(&Selection::resource("cloud_v"));
        let provider = &doc.schemas["example/cloud"];
        assert!(provider.resource_schemas.is_empty());
    }

    #[test]
    fn test_data_source_versions() {
        let doc = export(&Selection::data_source("all"));
        let data_sources = &doc.schemas["example/cloud"].data_source_schemas;
        assert_eq!(data_sources["cloud_vpc"].version, 1);
    }

    #[test]
    fn test_missing_group_is_empty() {
        let schemas = Schemas {
            providers: BTreeMap::from([("example/bare".to_string(), ProviderSchema::default())]),
        };
        let json = marshal(&schemas, &Selection::resource("all")).unwrap();
        assert_eq!(json, "{\n  \"provider_schemas\": {\n    \"example/bare\": {}\n  }\n}");
    }

    #[test]
    fn test_duplicate_key_keeps_first_identifier() {
        let prefixed = ProviderSchema {
            provider: Some(Block::new().with_attribute("prefixed", Attribute::new("string"))),
            ..Default::default()
        };
        let plain = ProviderSchema {
            provider: Some(Block::new().with_attribute("plain", Attribute::new("string"))),
            ..Default::default()
        };
        let schemas = Schemas {
            providers: BTreeMap::from([
                ("local-registry/example/cloud".to_string(), prefixed),
                ("example/cloud".to_string(), plain),
            ]),
        };

        let doc = marshal_document(&schemas, &Selection::provider(), &ExportConfig::default());
        assert_eq!(doc.schemas.len(), 1);
        let block = doc.schemas["example/cloud"].provider.as_ref().unwrap().block.as_ref().unwrap();
        assert!(block.attributes.contains_key("plain"));
        assert!(!block.attributes.contains_key("prefixed"));
    }

    #[test]
    fn test_compact_output() {
        let mut config = ExportConfig::default();
        config.output.format = OutputFormat::Compact;
        let json = marshal_with(&schemas(), &Selection::data_source("cloud_vpc"), &config).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("\"short\":\"VPC\""));
    }
}
