//! # Outbound Network Validation
//!
//! Numeric bounds for the load balancer and NAT gateway outbound settings.

use super::error::{Result, ValidationError};
use crate::constants::{
    LOAD_BALANCER_IDLE_TIMEOUT_RANGE, LOAD_BALANCER_OUTBOUND_PORTS_RANGE,
    NAT_GATEWAY_IDLE_TIMEOUT_RANGE, NAT_GATEWAY_OUTBOUND_IP_COUNT_RANGE,
};
use crate::namespace::{flag_name, Namespace};

/// Check an optional integer field lies in `[min, max]`
///
/// # Errors
/// Fails with `"--{flag} must be in the range [{min},{max}]"`.
pub fn validate_int_range(namespace: &Namespace, field: &str, (min, max): (i64, i64)) -> Result<()> {
    match namespace.get_integer(field)? {
        Some(value) if !(min..=max).contains(&value) => Err(ValidationError::new(format!(
            "{} must be in the range [{min},{max}]",
            flag_name(field)
        ))),
        _ => Ok(()),
    }
}

/// Validate `load_balancer_idle_timeout` (minutes)
///
/// # Errors
/// Fails outside [4,100].
pub fn validate_load_balancer_idle_timeout(namespace: &mut Namespace) -> Result<()> {
    validate_int_range(
        namespace,
        "load_balancer_idle_timeout",
        LOAD_BALANCER_IDLE_TIMEOUT_RANGE,
    )
}

/// Validate `load_balancer_outbound_ports`, allocated SNAT ports per VM
///
/// # Errors
/// Fails outside [0,64000] or when not a multiple of 8.
pub fn validate_load_balancer_outbound_ports(namespace: &mut Namespace) -> Result<()> {
    let field = "load_balancer_outbound_ports";
    validate_int_range(namespace, field, LOAD_BALANCER_OUTBOUND_PORTS_RANGE)?;
    if namespace.get_integer(field)?.is_some_and(|ports| ports % 8 != 0) {
        return Err(ValidationError::new(
            "--load-balancer-outbound-ports must be a multiple of 8",
        ));
    }
    Ok(())
}

/// Validate `nat_gateway_managed_outbound_ip_count`
///
/// # Errors
/// Fails outside [1,16].
pub fn validate_nat_gateway_managed_outbound_ip_count(namespace: &mut Namespace) -> Result<()> {
    validate_int_range(
        namespace,
        "nat_gateway_managed_outbound_ip_count",
        NAT_GATEWAY_OUTBOUND_IP_COUNT_RANGE,
    )
}

/// Validate `nat_gateway_idle_timeout` (minutes)
///
/// # Errors
/// Fails outside [4,120].
pub fn validate_nat_gateway_idle_timeout(namespace: &mut Namespace) -> Result<()> {
    validate_int_range(namespace, "nat_gateway_idle_timeout", NAT_GATEWAY_IDLE_TIMEOUT_RANGE)
}
