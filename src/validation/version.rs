//! # Kubernetes Version Validation

use std::sync::LazyLock;

use regex::Regex;

use super::error::{Result, ValidationError};
use crate::namespace::{ArgValue, Namespace};

pub const KUBERNETES_VERSION_FIELD: &str = "kubernetes_version";

// MAJOR.MINOR.PATCH or the MAJOR.MINOR alias
static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]+\.[0-9]+(\.[0-9]+)?$")
        .expect("Failed to compile VERSION_REGEX - this should never happen")
});

/// Validate `kubernetes_version`
///
/// Empty means "use the default version". YAML params files must quote
/// versions, `1.20` would otherwise arrive as the number 1.2.
///
/// # Errors
/// Fails for anything but `MAJOR.MINOR.PATCH` or `MAJOR.MINOR`.
pub fn validate_k8s_version(namespace: &mut Namespace) -> Result<()> {
    match namespace.get(KUBERNETES_VERSION_FIELD) {
        None => Ok(()),
        Some(ArgValue::Str(version)) if version.is_empty() => Ok(()),
        Some(ArgValue::Str(version)) if VERSION_REGEX.is_match(version) => Ok(()),
        Some(_) => Err(ValidationError::new(
            "--kubernetes-version should be the full version number or alias minor version, such as \"1.7.12\" or \"1.7\"",
        )),
    }
}
