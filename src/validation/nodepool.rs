//! # Node Pool Validation
//!
//! Validates node pool names, sizes, host names, taints and labels.
//! Name and label rules follow the Kubernetes object naming rules (RFC 1123).

use std::sync::LazyLock;

use regex::Regex;

use super::error::{Result, ValidationError};
use crate::constants::{MAX_NODEPOOL_NAME_LENGTH, MAX_NODE_COUNT, MIN_NODE_COUNT, TAINT_EFFECTS};
use crate::namespace::{ArgValue, Namespace};

/// Node count assumed by `--max-pods` when `--node-count` is not given
const DEFAULT_NODE_COUNT: i64 = 3;

// RFC 1123 host name: dot-separated labels of alphanumerics and inner hyphens, 63 chars each
static HOST_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([a-zA-Z0-9]|[a-zA-Z0-9][a-zA-Z0-9-]{0,61}[a-zA-Z0-9])(\.([a-zA-Z0-9]|[a-zA-Z0-9][a-zA-Z0-9-]{0,61}[a-zA-Z0-9]))*$",
    )
    .expect("Failed to compile HOST_NAME_REGEX - this should never happen")
});

// key=value:effect; key may carry a DNS prefix, effect is checked separately
static TAINT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<key>[a-zA-Z0-9][a-zA-Z0-9_./-]{0,252})=(?P<value>[a-zA-Z0-9][a-zA-Z0-9_.-]{0,62}):(?P<effect>[A-Za-z]+)$",
    )
    .expect("Failed to compile TAINT_REGEX - this should never happen")
});

// Kubernetes label name / value: alphanumerics, '-', '_', '.'; alphanumeric at both ends
static LABEL_PART_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9]([-A-Za-z0-9_.]*[A-Za-z0-9])?$")
        .expect("Failed to compile LABEL_PART_REGEX - this should never happen")
});

// RFC 1123 subdomain, used for the optional label key prefix
static DNS_SUBDOMAIN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$")
        .expect("Failed to compile DNS_SUBDOMAIN_REGEX - this should never happen")
});

/// Validate `nodepool_name`
/// Length: at most 12 characters, ASCII alphanumeric only
///
/// # Errors
/// Fails when the name is too long or has other characters.
pub fn validate_nodepool_name(namespace: &mut Namespace) -> Result<()> {
    let name = match namespace.get("nodepool_name") {
        None => return Ok(()),
        Some(ArgValue::Str(name)) if name.is_empty() => return Ok(()),
        Some(ArgValue::Str(name)) => name,
        Some(_) => {
            return Err(ValidationError::new(
                "--nodepool-name should contain only alphanumeric characters",
            ))
        }
    };

    if name.chars().count() > MAX_NODEPOOL_NAME_LENGTH {
        return Err(ValidationError::new(
            "--nodepool-name can contain at most 12 characters",
        ));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::new(
            "--nodepool-name should contain only alphanumeric characters",
        ));
    }
    Ok(())
}

/// Validate autoscaler bounds `min_count` / `max_count`
///
/// # Errors
/// Fails when a bound is outside [1,1000] or min exceeds max.
pub fn validate_nodes_count(namespace: &mut Namespace) -> Result<()> {
    let min_count = namespace.get_integer("min_count")?;
    let max_count = namespace.get_integer("max_count")?;

    for (flag, count) in [("--min-count", min_count), ("--max-count", max_count)] {
        if let Some(count) = count {
            if !(MIN_NODE_COUNT..=MAX_NODE_COUNT).contains(&count) {
                return Err(ValidationError::new(format!(
                    "{flag} must be in the range [{MIN_NODE_COUNT},{MAX_NODE_COUNT}]"
                )));
            }
        }
    }

    if let (Some(min), Some(max)) = (min_count, max_count) {
        if min > max {
            return Err(ValidationError::new(
                "--min-count must be less than or equal to --max-count",
            ));
        }
    }
    Ok(())
}

/// Validate `max_pods` leaves room for the system pods on every node
///
/// 0 means "service default". Otherwise each node needs at least
/// `ceil((node_count * 2 + 6 + 1) / node_count)` pods.
///
/// # Errors
/// Fails when `max_pods` is below that floor.
pub fn validate_max_pods(namespace: &mut Namespace) -> Result<()> {
    let max_pods = match namespace.get_integer("max_pods")? {
        None | Some(0) => return Ok(()),
        Some(max_pods) => max_pods,
    };
    let node_count = namespace
        .get_integer("node_count")?
        .filter(|count| *count > 0)
        .unwrap_or(DEFAULT_NODE_COUNT);

    let minimum = minimum_pods_required(node_count);
    if max_pods < minimum {
        return Err(ValidationError::new(format!(
            "--max-pods must be at least {minimum} for a managed Kubernetes cluster to function."
        )));
    }
    Ok(())
}

fn minimum_pods_required(node_count: i64) -> i64 {
    (node_count * 2 + 6 + 1 + node_count - 1) / node_count
}

/// Validate the cluster `name` doubles as a valid Linux host name
///
/// # Errors
/// Fails when the name is not an RFC 1123 host name.
pub fn validate_linux_host_name(namespace: &mut Namespace) -> Result<()> {
    match namespace.get("name") {
        None => Ok(()),
        Some(ArgValue::Str(name)) if HOST_NAME_REGEX.is_match(name) => Ok(()),
        Some(_) => Err(ValidationError::new(
            "--name cannot exceed 63 characters and can only contain letters, numbers, or dashes (-).",
        )),
    }
}

/// Validate one `key=value:effect` taint
///
/// # Errors
/// Fails when the taint is malformed or the effect is unknown.
pub fn validate_taint(taint: &str) -> Result<()> {
    let taint = taint.trim();
    if taint.is_empty() {
        return Ok(());
    }
    let effect_known = TAINT_REGEX
        .captures(taint)
        .and_then(|captures| captures.name("effect"))
        .is_some_and(|effect| TAINT_EFFECTS.contains(&effect.as_str()));
    if !effect_known {
        return Err(ValidationError::new(format!(
            "Taint does not match pattern key=value:effect: {taint}"
        )));
    }
    Ok(())
}

/// Validate `node_taints`, a comma-separated list of taints
///
/// # Errors
/// Fails on the first invalid taint.
pub fn validate_nodepool_taints(namespace: &mut Namespace) -> Result<()> {
    let taints = match namespace.get("node_taints") {
        None => return Ok(()),
        Some(ArgValue::Str(taints)) => vec![taints.clone()],
        Some(ArgValue::List(taints)) => taints.clone(),
        Some(value) => {
            return Err(ValidationError::new(format!(
                "Taint does not match pattern key=value:effect: {value}"
            )));
        }
    };
    taints
        .iter()
        .flat_map(|entry| entry.split(','))
        .try_for_each(validate_taint)
}

/// Validate one node label
///
/// Key: optional `prefix/` (DNS subdomain, max 253) plus a name (max 63).
/// Value: empty, or max 63 with the same character rules as the name.
///
/// # Errors
/// Fails with a message naming the offending label and the rule it breaks.
pub fn validate_label(key: &str, value: &str) -> Result<()> {
    let invalid =
        |reason: &str| ValidationError::new(format!("Invalid label: {key}={value}. {reason}"));

    let (prefix, name) = match key.split('/').collect::<Vec<_>>().as_slice() {
        [name] => (None, *name),
        [prefix, name] => (Some(*prefix), *name),
        _ => return Err(invalid("Label definition must be of format name=value.")),
    };

    if name.len() > 63 {
        return Err(invalid("Label key name can not be longer than 63 characters."));
    }
    if !LABEL_PART_REGEX.is_match(name) {
        return Err(invalid(
            "Label key name must consist of alphanumeric characters, '-', '_' or '.', and must start and end with an alphanumeric character.",
        ));
    }

    if let Some(prefix) = prefix {
        if prefix.len() > 253 {
            return Err(invalid("Label key prefix can not be longer than 253 characters."));
        }
        if !DNS_SUBDOMAIN_REGEX.is_match(prefix) {
            return Err(invalid(
                "Label key prefix must be a DNS subdomain: lowercase alphanumeric characters, '-' or '.', starting and ending with an alphanumeric character.",
            ));
        }
    }

    if value.len() > 63 {
        return Err(invalid("Label value can not be longer than 63 characters."));
    }
    if !value.is_empty() && !LABEL_PART_REGEX.is_match(value) {
        return Err(invalid(
            "Label value must be empty or consist of alphanumeric characters, '-', '_' or '.', and must start and end with an alphanumeric character.",
        ));
    }
    Ok(())
}

/// Validate `nodepool_labels`
///
/// Accepts a whitespace- or comma-separated string, a list of `key=value`
/// entries, or an already-parsed map.
///
/// # Errors
/// Fails on the first invalid label.
pub fn validate_nodepool_labels(namespace: &mut Namespace) -> Result<()> {
    let entries: Vec<String> = match namespace.get("nodepool_labels") {
        None => return Ok(()),
        Some(ArgValue::Map(labels)) => {
            return labels
                .iter()
                .try_for_each(|(key, value)| validate_label(key, value));
        }
        Some(ArgValue::Str(labels)) => labels
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect(),
        Some(ArgValue::List(labels)) => labels.clone(),
        Some(_) => vec![String::new()],
    };

    for entry in &entries {
        let Some((key, value)) = entry.split_once('=') else {
            return Err(ValidationError::new(format!(
                "Invalid label: {entry}. Label definition must be of format name=value."
            )));
        };
        validate_label(key, value)?;
    }
    Ok(())
}
