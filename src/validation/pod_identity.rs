//! # Pod Identity Validation
//!
//! Presence checks for the pod identity commands' `--name` and `--namespace`.

use super::error::{Result, ValidationError};
use crate::namespace::{flag_name, ArgValue, Namespace};

/// A namespace field that a command may require
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredField {
    pub field: &'static str,
    pub required: bool,
}

/// `az aks pod-identity add/delete --name`
pub const POD_IDENTITY_NAME: RequiredField = RequiredField {
    field: "identity_name",
    required: true,
};

/// `az aks pod-identity add/delete --namespace`
pub const POD_IDENTITY_NAMESPACE: RequiredField = RequiredField {
    field: "namespace",
    required: true,
};

impl RequiredField {
    /// Flag shown to the user; `identity_name` is exposed as `--name`
    #[must_use]
    pub fn display_name(&self) -> String {
        match self.field {
            "identity_name" => "--name".to_string(),
            field => flag_name(field),
        }
    }
}

/// Check that `rule.field` is present when required
///
/// Absent and empty values are "missing". An optional missing field is set
/// to the empty string so later code can read it unconditionally.
///
/// # Errors
/// Fails with `"{flag} is required"` for a missing required field.
pub fn validate_required_field(rule: RequiredField, namespace: &mut Namespace) -> Result<()> {
    let missing = namespace
        .get(rule.field)
        .is_none_or(ArgValue::is_empty);
    if !missing {
        return Ok(());
    }
    if rule.required {
        return Err(ValidationError::new(format!(
            "{} is required",
            rule.display_name()
        )));
    }
    namespace.set(rule.field, "");
    Ok(())
}

/// Validator for a pod identity resource name held in `field`
#[must_use]
pub fn validate_pod_identity_resource_name(field: &'static str, required: bool) -> RequiredField {
    RequiredField { field, required }
}

/// Validate that the pod identity `--namespace` was given
///
/// # Errors
/// Fails with `"--namespace is required"`.
pub fn validate_pod_identity_resource_namespace(namespace: &mut Namespace) -> Result<()> {
    validate_required_field(POD_IDENTITY_NAMESPACE, namespace)
}
