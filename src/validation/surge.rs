//! # Max Surge Validation
//!
//! Validates `--max-surge`, the extra node budget used during upgrades.

use super::error::{Result, ValidationError};
use crate::namespace::{ArgValue, Namespace};

pub const MAX_SURGE_FIELD: &str = "max_surge";

/// Parsed `--max-surge` value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxSurge {
    /// Absolute number of extra nodes
    Nodes(i64),
    /// Percentage of the pool size; values above 100 are allowed
    Percent(i64),
}

impl MaxSurge {
    /// Parse `"5"` or `"33%"`; a single trailing `%` marks a percentage
    ///
    /// Values are `i64`-bounded: larger integers return None here and are
    /// handled by [`validate_max_surge`].
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        match value.strip_suffix('%') {
            Some(percent) => percent.parse().ok().map(MaxSurge::Percent),
            None => value.parse().ok().map(MaxSurge::Nodes),
        }
    }

    #[must_use]
    pub fn magnitude(self) -> i64 {
        match self {
            MaxSurge::Nodes(n) | MaxSurge::Percent(n) => n,
        }
    }
}

/// Validate `max_surge` as a non-negative int or percentage
///
/// # Errors
/// Fails when the value is neither form, or is negative.
pub fn validate_max_surge(namespace: &mut Namespace) -> Result<()> {
    let raw = match namespace.get(MAX_SURGE_FIELD) {
        None => return Ok(()),
        Some(ArgValue::Str(s)) => s.clone(),
        Some(ArgValue::Number(n)) => n.to_string(),
        Some(_) => return Err(not_int_or_percentage()),
    };

    let negative = match MaxSurge::parse(&raw) {
        Some(surge) => surge.magnitude() < 0,
        None => oversized_integer_sign(&raw).ok_or_else(not_int_or_percentage)?,
    };
    if negative {
        return Err(ValidationError::new("--max-surge must be positive"));
    }
    Ok(())
}

/// Sign of a well-formed integer (or percentage) that does not fit `i64`;
/// Some(true) when negative
fn oversized_integer_sign(value: &str) -> Option<bool> {
    let value = value.trim();
    let digits = value.strip_suffix('%').unwrap_or(value);
    let (negative, digits) = match digits.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, digits.strip_prefix('+').unwrap_or(digits)),
    };
    (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())).then_some(negative)
}

fn not_int_or_percentage() -> ValidationError {
    ValidationError::new("--max-surge should be an int or percentage")
}
