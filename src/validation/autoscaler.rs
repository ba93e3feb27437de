//! # Cluster Autoscaler Profile Validation
//!
//! Validates `--cluster-autoscaler-profile key=value [key=value ...]`.

use std::collections::BTreeMap;

use tracing::debug;

use super::error::{Result, ValidationError};
use crate::constants::CLUSTER_AUTOSCALER_PROFILE_KEYS;
use crate::namespace::{ArgValue, Namespace};

pub const AUTOSCALER_PROFILE_FIELD: &str = "cluster_autoscaler_profile";

/// Validate the autoscaler profile and fold it into a key -> value map
///
/// Each entry is split on the first `=`. Keys must be known autoscaler
/// settings, values may be empty. When a key repeats, the last value wins.
/// A field that is already a map has been through here before and is only
/// re-checked for its keys.
///
/// # Errors
/// Fails on the first malformed entry, empty key or unknown key, in input order.
pub fn validate_cluster_autoscaler_profile(namespace: &mut Namespace) -> Result<()> {
    let entries = match namespace.get(AUTOSCALER_PROFILE_FIELD) {
        None => return Ok(()),
        Some(ArgValue::Map(profile)) => {
            return profile.keys().try_for_each(|key| validate_autoscaler_key(key));
        }
        Some(_) => namespace
            .get_list(AUTOSCALER_PROFILE_FIELD)
            .ok_or_else(malformed_entry)?,
    };

    let mut profile = BTreeMap::new();
    for entry in &entries {
        let (key, value) = entry.split_once('=').ok_or_else(malformed_entry)?;
        validate_autoscaler_key(key)?;
        profile.insert(key.to_string(), value.to_string());
    }

    debug!(keys = profile.len(), "Cluster autoscaler profile accepted");
    namespace.set(AUTOSCALER_PROFILE_FIELD, profile);
    Ok(())
}

fn malformed_entry() -> ValidationError {
    ValidationError::new("--cluster-autoscaler-profile should be of the form key=value")
}

/// Validate one autoscaler setting name
///
/// # Errors
/// Fails for an empty key or a key outside the known settings.
pub fn validate_autoscaler_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(ValidationError::new(
            "Empty key specified for cluster-autoscaler-profile",
        ));
    }
    if !CLUSTER_AUTOSCALER_PROFILE_KEYS.contains(&key) {
        return Err(ValidationError::new(format!(
            "Invalid key specified for cluster-autoscaler-profile: {key}"
        )));
    }
    Ok(())
}
