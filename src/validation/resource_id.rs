//! # Azure Resource ID Validation
//!
//! Structural checks for ARM resource identifiers passed as CLI options
//! (subnets, managed identities, public IP prefixes). No lookups are made:
//! a well-formed ID of a resource that does not exist still passes.

use std::sync::LazyLock;

use regex::Regex;

use super::error::{Result, ValidationError};
use crate::namespace::Namespace;

/// `/subscriptions/{sub}/resourceGroups/{rg}/providers/{ns}/{type}/{name}[/{type}/{name}...]`
static RESOURCE_ID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^/subscriptions/(?P<subscription>[^/]+)/resourceGroups/(?P<resource_group>[^/]+)/providers/(?P<namespace>[^/]+)/(?P<type>[^/]+)/(?P<name>[^/]+)(?P<children>(?:/[^/]+/[^/]+)*)$",
    )
    .expect("Failed to compile RESOURCE_ID_REGEX - this should never happen")
});

/// Components of a parsed resource ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceId {
    pub subscription: String,
    pub resource_group: String,
    pub namespace: String,
    pub resource_type: String,
    pub name: String,
    /// Nested `(type, name)` pairs, e.g. `("subnets", "default")` under a virtual network
    pub children: Vec<(String, String)>,
}

impl ResourceId {
    /// Parse a resource ID, or None when it does not have the ARM shape
    #[must_use]
    pub fn parse(id: &str) -> Option<Self> {
        let captures = RESOURCE_ID_REGEX.captures(id)?;
        let group = |name: &str| {
            captures
                .name(name)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default()
        };

        let children_raw = group("children");
        let segments: Vec<&str> = children_raw.split('/').filter(|s| !s.is_empty()).collect();
        let children = segments
            .chunks_exact(2)
            .map(|pair| (pair[0].to_string(), pair[1].to_string()))
            .collect();

        Some(Self {
            subscription: group("subscription"),
            resource_group: group("resource_group"),
            namespace: group("namespace"),
            resource_type: group("type"),
            name: group("name"),
            children,
        })
    }

    /// Name of the innermost resource
    #[must_use]
    pub fn leaf_name(&self) -> &str {
        self.children
            .last()
            .map_or(self.name.as_str(), |(_, name)| name.as_str())
    }
}

#[must_use]
pub fn is_valid_resource_id(id: &str) -> bool {
    RESOURCE_ID_REGEX.is_match(id)
}

/// Validate an optional resource ID supplied through `option`
///
/// `None` and `""` mean the option is unset and pass.
///
/// # Errors
/// Fails with `"{option} is not a valid Azure resource ID."` for anything
/// that is not shaped like a resource ID.
pub fn validate_resource_id(value: Option<&str>, option: &str) -> Result<()> {
    match value {
        None | Some("") => Ok(()),
        Some(id) if is_valid_resource_id(id) => Ok(()),
        Some(_) => Err(ValidationError::new(format!(
            "{option} is not a valid Azure resource ID."
        ))),
    }
}

fn validate_resource_id_field(namespace: &Namespace, field: &str, option: &str) -> Result<()> {
    if namespace.get(field).is_some() && namespace.get_str(field).is_none() {
        return Err(ValidationError::new(format!(
            "{option} is not a valid Azure resource ID."
        )));
    }
    validate_resource_id(namespace.get_str(field), option)
}

/// Validate `--vnet-subnet-id`
///
/// # Errors
/// See [`validate_resource_id`].
pub fn validate_vnet_subnet_id(namespace: &mut Namespace) -> Result<()> {
    validate_resource_id_field(namespace, "vnet_subnet_id", "--vnet-subnet-id")
}

/// Validate `--pod-subnet-id`
///
/// # Errors
/// See [`validate_resource_id`].
pub fn validate_pod_subnet_id(namespace: &mut Namespace) -> Result<()> {
    validate_resource_id_field(namespace, "pod_subnet_id", "--pod-subnet-id")
}

/// Validate `--assign-identity`
///
/// # Errors
/// See [`validate_resource_id`].
pub fn validate_assign_identity(namespace: &mut Namespace) -> Result<()> {
    validate_resource_id_field(namespace, "assign_identity", "--assign-identity")
}

/// Validate `--assign-kubelet-identity`
///
/// # Errors
/// See [`validate_resource_id`].
pub fn validate_assign_kubelet_identity(namespace: &mut Namespace) -> Result<()> {
    validate_resource_id_field(
        namespace,
        "assign_kubelet_identity",
        "--assign-kubelet-identity",
    )
}

/// Validate `--node-public-ip-prefix-id`
///
/// # Errors
/// See [`validate_resource_id`].
pub fn validate_node_public_ip_prefix_id(namespace: &mut Namespace) -> Result<()> {
    validate_resource_id_field(
        namespace,
        "node_public_ip_prefix_id",
        "--node-public-ip-prefix-id",
    )
}
