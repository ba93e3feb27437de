//! # Addon Validation
//!
//! Validates `--enable-addons` / `--addons` against the known add-on set.

use super::error::{Result, ValidationError};
use crate::constants::ADDONS;
use crate::namespace::{ArgValue, Namespace};

pub const ADDONS_FIELD: &str = "addons";

/// Addon profile key for a CLI add-on name, if the add-on is known
#[must_use]
pub fn addon_profile_name(addon: &str) -> Option<&'static str> {
    ADDONS
        .iter()
        .find(|(name, _)| *name == addon)
        .map(|(_, profile)| *profile)
}

/// Validate a single add-on name (exact match only)
///
/// # Errors
/// Fails when `addon` is not in the known set.
pub fn validate_addon_name(addon: &str) -> Result<()> {
    if addon_profile_name(addon).is_some() {
        return Ok(());
    }
    let options = ADDONS
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ");
    Err(ValidationError::new(format!(
        "The addon \"{addon}\" is an invalid addon name. Possible options: {options}"
    )))
}

/// Validate `addons`
///
/// Accepts `monitoring,azure-policy` as well as `addon=config` pairs; only
/// the part before `=` is checked. A list value is checked element by element.
///
/// # Errors
/// Fails on the first unknown add-on.
pub fn validate_addons(namespace: &mut Namespace) -> Result<()> {
    let entries: Vec<String> = match namespace.get(ADDONS_FIELD) {
        None => return Ok(()),
        Some(ArgValue::Str(addons)) => addons.split(',').map(str::to_string).collect(),
        Some(ArgValue::List(addons)) => addons.clone(),
        Some(_) => vec![String::new()],
    };

    for entry in &entries {
        let name = entry.split_once('=').map_or(entry.as_str(), |(name, _)| name);
        validate_addon_name(name)?;
    }
    Ok(())
}
