//! Product classification
//!
//! Best-effort mapping from a resource or data source type name to the cloud
//! service that owns it, e.g. `huaweicloud_obs_bucket_policy` -> OBS,
//! "Object Storage Service", "Storage". A miss is not an error; the product
//! is simply left out of the export.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::trace;

/// Service short code -> catalog grouping
static CATALOGS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("ECS", "Compute"),
        ("AS", "Compute"),
        ("EVS", "Storage"),
        ("OBS", "Storage"),
        ("SFS", "Storage"),
        ("VPC", "Network"),
        ("ELB", "Network"),
        ("DNS", "Network"),
        ("NAT", "Network"),
        ("VPCEP", "Network"),
        ("DDS", "Database"),
        ("RDS", "Database"),
        ("CCE", "Container"),
        ("APIG", "Application"),
    ])
});

/// Service short code -> full service name
static SERVICES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("ECS", "Elastic Cloud Server"),
        ("AS", "Auto Scaling"),
        ("EVS", "Elastic Volume Service"),
        ("OBS", "Object Storage Service"),
        ("SFS", "Scalable File Service"),
        ("VPC", "Virtual Private Cloud"),
        ("ELB", "Elastic Load Balance"),
        ("DNS", "Domain Name Service"),
        ("NAT", "NAT Gateway"),
        ("VPCEP", "VPC Endpoint"),
        ("DDS", "Document Database Service"),
        ("RDS", "Relational Database Service"),
        ("CCE", "Cloud Container Engine"),
        ("APIG", "API GateWay"),
    ])
});

/// Resource family names that don't spell their service code
static ALIASES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("compute", "ECS"),
        ("networking", "VPC"),
        ("networking_vip", "VPC"),
        ("networking_secgroup", "VPC"),
        ("vpc_peering", "VPC"),
        ("lb", "ELB"),
        ("rds_read_replica", "RDS"),
        ("api_gateway", "APIG"),
        ("nat_dnat", "NAT"),
        ("nat_snat", "NAT"),
        ("obs_bucket", "OBS"),
        ("sfs_access", "SFS"),
        ("sfs_file", "SFS"),
    ])
});

/// Service metadata attached to a single named schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductJson {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub catalog: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub short: String,
}

/// Pick the service candidate out of a type name.
///
/// `prefix_svc` and `prefix_svc_thing` use the second token;
/// longer names use everything between the first and the last token.
pub fn service_candidate(type_name: &str) -> Option<String> {
    let tokens: Vec<&str> = type_name.split('_').collect();
    match tokens.len() {
        0 | 1 => None,
        2 | 3 => Some(tokens[1].to_string()),
        n => Some(tokens[1..n - 1].join("_")),
    }
}

/// Resolve a candidate to a service short code
pub fn short_code(candidate: &str) -> String {
    ALIASES
        .get(candidate)
        .map(|code| code.to_string())
        .unwrap_or_else(|| candidate.to_uppercase())
}

/// Classify a resource or data source type name
pub fn marshal_product(type_name: &str) -> Option<ProductJson> {
    let candidate = service_candidate(type_name)?;
    let short = short_code(&candidate);

    let (Some(name), Some(catalog)) = (SERVICES.get(short.as_str()), CATALOGS.get(short.as_str()))
    else {
        trace!(type_name, short = %short, "no product for service code");
        return None;
    };

    Some(ProductJson {
        catalog: catalog.to_string(),
        name: name.to_string(),
        short,
    })
}
