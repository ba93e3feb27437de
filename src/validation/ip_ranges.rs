//! # API Server Authorized IP Ranges
//!
//! Validates `--api-server-authorized-ip-ranges`: a comma-separated list of
//! public IPv4 addresses or CIDRs.
//!
//! Two entries are special:
//! - `""` on its own disables the feature
//! - `0.0.0.0/32` on its own restricts traffic to the agent nodes

use std::net::{Ipv4Addr, Ipv6Addr};

use tracing::debug;

use super::error::{Result, ValidationError};
use crate::constants::RESTRICT_TO_AGENT_NODES;
use crate::namespace::Namespace;

pub const IP_RANGES_FIELD: &str = "api_server_authorized_ip_ranges";

/// Ranges that are not globally routable.
/// A network is rejected when both of its ends fall in this table.
const RESERVED_IPV4: &[(Ipv4Addr, u8)] = &[
    (Ipv4Addr::new(0, 0, 0, 0), 8),         // "this" network
    (Ipv4Addr::new(10, 0, 0, 0), 8),        // private
    (Ipv4Addr::new(100, 64, 0, 0), 10),     // shared address space (CGNAT)
    (Ipv4Addr::new(127, 0, 0, 0), 8),       // loopback
    (Ipv4Addr::new(169, 254, 0, 0), 16),    // link-local
    (Ipv4Addr::new(172, 16, 0, 0), 12),     // private
    (Ipv4Addr::new(192, 0, 0, 0), 29),      // IETF protocol assignments
    (Ipv4Addr::new(192, 0, 0, 170), 31),    // NAT64/DNS64 discovery
    (Ipv4Addr::new(192, 0, 2, 0), 24),      // TEST-NET-1
    (Ipv4Addr::new(192, 168, 0, 0), 16),    // private
    (Ipv4Addr::new(198, 18, 0, 0), 15),     // benchmarking
    (Ipv4Addr::new(198, 51, 100, 0), 24),   // TEST-NET-2
    (Ipv4Addr::new(203, 0, 113, 0), 24),    // TEST-NET-3
    (Ipv4Addr::new(240, 0, 0, 0), 4),       // reserved
    (Ipv4Addr::new(255, 255, 255, 255), 32), // limited broadcast
];

/// Validate `api_server_authorized_ip_ranges`
///
/// On success the field is rewritten as the cleaned, deduplicated list of
/// entries (input order kept).
///
/// # Errors
/// Returns the first rule the list breaks, see the module docs.
pub fn validate_ip_ranges(namespace: &mut Namespace) -> Result<()> {
    if namespace.get(IP_RANGES_FIELD).is_none() {
        return Ok(());
    }
    let Some(raw) = namespace.get_list(IP_RANGES_FIELD) else {
        return Err(not_ipv4_list());
    };
    if matches!(raw.as_slice(), [only] if only.is_empty()) {
        return Ok(());
    }

    let ranges: Vec<String> = raw
        .iter()
        .flat_map(|entry| entry.split(','))
        .map(|entry| entry.trim().to_string())
        .collect();

    // "" only disables the feature when it is the sole entry
    if ranges.len() > 1 && ranges.iter().any(String::is_empty) {
        return Err(ValidationError::new(
            "--api-server-authorized-ip-ranges cannot be disabled and simultaneously enabled",
        ));
    }

    if ranges.iter().any(|r| r == RESTRICT_TO_AGENT_NODES)
        && ranges.iter().any(|r| r != RESTRICT_TO_AGENT_NODES)
    {
        return Err(ValidationError::new(
            "Setting --api-server-authorized-ip-ranges to 0.0.0.0/32 is not allowed with other IP ranges. Refer to https://aka.ms/aks/whitelist for more details",
        ));
    }

    for range in ranges
        .iter()
        .filter(|r| !r.is_empty() && r.as_str() != RESTRICT_TO_AGENT_NODES)
    {
        validate_ip_range(range)?;
    }

    let mut cleaned: Vec<String> = Vec::with_capacity(ranges.len());
    for range in ranges {
        if !cleaned.contains(&range) {
            cleaned.push(range);
        }
    }
    debug!(count = cleaned.len(), "Authorized IP ranges accepted");
    namespace.set(IP_RANGES_FIELD, cleaned);

    Ok(())
}

/// Validate a single address or CIDR entry
fn validate_ip_range(range: &str) -> Result<()> {
    let Some((network, prefix)) = parse_ipv4_network(range) else {
        if is_ipv6_network(range) {
            return Err(ValidationError::new(
                "--api-server-authorized-ip-ranges cannot be IPv6 addresses",
            ));
        }
        return Err(not_ipv4_list());
    };

    if !is_global(network, prefix) {
        return Err(ValidationError::new(
            "--api-server-authorized-ip-ranges must be global non-reserved addresses or CIDRs",
        ));
    }

    Ok(())
}

fn not_ipv4_list() -> ValidationError {
    ValidationError::new("--api-server-authorized-ip-ranges should be a list of IPv4 addresses or CIDRs")
}

/// Parse `a.b.c.d` or `a.b.c.d/len` into (network, prefix length)
///
/// Strict: an address with host bits set under its prefix is not a network.
pub(crate) fn parse_ipv4_network(range: &str) -> Option<(u32, u8)> {
    let (addr, prefix) = match range.split_once('/') {
        Some((addr, prefix)) => (addr, parse_prefix(prefix, 32)?),
        None => (range, 32),
    };
    let network = u32::from(addr.parse::<Ipv4Addr>().ok()?);
    if network & !prefix_mask(prefix) != 0 {
        return None;
    }
    Some((network, prefix))
}

fn is_ipv6_network(range: &str) -> bool {
    let (addr, prefix_ok) = match range.split_once('/') {
        Some((addr, prefix)) => (addr, parse_prefix(prefix, 128).is_some()),
        None => (range, true),
    };
    prefix_ok && addr.parse::<Ipv6Addr>().is_ok()
}

fn parse_prefix(prefix: &str, max: u8) -> Option<u8> {
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    prefix.parse::<u8>().ok().filter(|p| *p <= max)
}

fn prefix_mask(prefix: u8) -> u32 {
    u32::MAX.checked_shl(32 - u32::from(prefix)).unwrap_or(0)
}

fn is_reserved(addr: u32) -> bool {
    RESERVED_IPV4.iter().any(|(base, prefix)| {
        let mask = prefix_mask(*prefix);
        addr & mask == u32::from(*base) & mask
    })
}

/// Global unless both the network and broadcast addresses are reserved
pub(crate) fn is_global(network: u32, prefix: u8) -> bool {
    let broadcast = network | !prefix_mask(prefix);
    !(is_reserved(network) && is_reserved(broadcast))
}
