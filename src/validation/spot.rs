//! # Spot Node Pool Validation
//!
//! Validates `--priority`, `--eviction-policy` and `--spot-max-price`.

use super::error::{Result, ValidationError};
use crate::constants::{
    SCALE_SET_PRIORITY_REGULAR, SCALE_SET_PRIORITY_SPOT, SPOT_EVICTION_POLICIES,
    SPOT_PRICE_MAX_DECIMAL_PLACES, SPOT_PRICE_ON_DEMAND,
};
use crate::namespace::{ArgValue, Namespace};

pub const SPOT_MAX_PRICE_FIELD: &str = "spot_max_price";
pub const PRIORITY_FIELD: &str = "priority";
pub const EVICTION_POLICY_FIELD: &str = "eviction_policy";

/// Validate `spot_max_price` against `priority`
///
/// Unset means absent or NaN. A set price needs `priority == Spot` and must
/// be exactly -1 (cap at the on-demand price) or a positive value with at
/// most five decimal places.
///
/// # Errors
/// Fails on the first rule broken, in the order above.
#[allow(clippy::float_cmp, reason = "-1 is an exact sentinel, not a computed value")]
pub fn validate_spot_max_price(namespace: &mut Namespace) -> Result<()> {
    let Some(price) = namespace.get_number(SPOT_MAX_PRICE_FIELD)? else {
        return Ok(());
    };
    if price.is_nan() {
        return Ok(());
    }

    if namespace.get_str(PRIORITY_FIELD) != Some(SCALE_SET_PRIORITY_SPOT) {
        return Err(ValidationError::new(
            "--spot_max_price can only be set when --priority is Spot",
        ));
    }

    if price == SPOT_PRICE_ON_DEMAND {
        return Ok(());
    }
    if price <= 0.0 || !price.is_finite() {
        return Err(ValidationError::new(
            "--spot_max_price can only be any decimal value greater than zero, or -1 which indicates default price to be up-to on-demand",
        ));
    }
    if decimal_places(price) > SPOT_PRICE_MAX_DECIMAL_PLACES {
        return Err(ValidationError::new(
            "--spot_max_price can only include up to 5 decimal places",
        ));
    }
    Ok(())
}

/// Digits after the decimal point in the shortest round-trip rendering,
/// so `5.0` has none and `0.068` has three
fn decimal_places(value: f64) -> usize {
    value
        .to_string()
        .split_once('.')
        .map_or(0, |(_, fraction)| fraction.len())
}

/// Validate `priority` is Spot or Regular
///
/// # Errors
/// Fails for any other value.
pub fn validate_priority(namespace: &mut Namespace) -> Result<()> {
    match namespace.get(PRIORITY_FIELD).map(ArgValue::as_str) {
        None | Some(Some("" | SCALE_SET_PRIORITY_SPOT | SCALE_SET_PRIORITY_REGULAR)) => Ok(()),
        Some(_) => Err(ValidationError::new(
            "--priority can only be Spot or Regular",
        )),
    }
}

/// Validate `eviction_policy` is Delete or Deallocate
///
/// # Errors
/// Fails for any other value.
pub fn validate_eviction_policy(namespace: &mut Namespace) -> Result<()> {
    match namespace.get(EVICTION_POLICY_FIELD).map(ArgValue::as_str) {
        None | Some(Some("")) => Ok(()),
        Some(Some(policy)) if SPOT_EVICTION_POLICIES.contains(&policy) => Ok(()),
        Some(_) => Err(ValidationError::new(
            "--eviction-policy can only be Delete or Deallocate",
        )),
    }
}
