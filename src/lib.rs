//! Provider Schema Export
//!
//! Converts resolved provider schemas (blocks of attributes and nested
//! blocks) into a stable, versioned JSON document.
//!
//! ## Pipeline
//!
//! ```text
//! Schemas ─► provider::marshal ─► block::marshal_block ─► attribute::marshal_attribute
//!                  │
//!                  └─► product::marshal_product  (single named entry only)
//! ```
//!
//! ## Rules applied while walking a block
//!
//! - **Deprecation**: deprecated attributes are dropped, deprecated nested
//!   blocks drop their whole block type entry
//! - **Timeouts**: the synthetic `timeouts` block type is never exported
//! - **Reserved identifiers**: `id`, `region` and `tenant_id` are always
//!   exported as required
//!
//! ## Output
//!
//! ```json
//! {
//!   "provider_schemas": {
//!     "example/cloud": {
//!       "resource_schemas": {
//!         "cloud_obs_bucket_policy": {
//!           "version": 1,
//!           "block": { "attributes": { "id": { "type": "string", "required": true } } },
//!           "product": { "catalog": "Storage", "name": "Object Storage Service", "short": "OBS" }
//!         }
//!       }
//!     }
//!   }
//! }
//! ```

pub mod attribute;
pub mod block;
pub mod config;
pub mod error;
pub mod product;
pub mod provider;
pub mod schema;

pub use attribute::AttributeJson;
pub use block::{BlockJson, BlockTypeJson, Marshaled};
pub use config::{ExportConfig, OutputFormat};
pub use error::{ExportError, Result};
pub use product::ProductJson;
pub use provider::{
    marshal, marshal_document, marshal_with, ProviderJson, ProvidersJson, SchemaJson, Selection,
    SourceType, Target,
};
pub use schema::{Attribute, Block, NestedBlock, NestingMode, ProviderSchema, Schemas};
