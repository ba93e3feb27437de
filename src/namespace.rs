//! # Namespace
//!
//! The parsed-argument container handed to every validator.
//!
//! A namespace maps option names (`api_server_authorized_ip_ranges`,
//! `max_surge`, ...) to raw values. A missing key means the option was not
//! supplied. Validators read fields and may rewrite them in place, e.g. turning
//! a comma-separated string into a list.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::validation::{Result, ValidationError};

/// Raw value of a single option
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ArgValue {
    Bool(bool),
    Number(f64),
    Str(String),
    List(Vec<String>),
    Map(BTreeMap<String, String>),
}

impl ArgValue {
    /// String payload, if this is a string value
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// True for values the CLI treats as "not supplied": empty strings, lists and maps
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            ArgValue::Str(s) => s.is_empty(),
            ArgValue::List(items) => items.is_empty(),
            ArgValue::Map(map) => map.is_empty(),
            ArgValue::Bool(_) | ArgValue::Number(_) => false,
        }
    }
}

/// Renders the value the way it would be typed on the command line
impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Bool(b) => write!(f, "{b}"),
            ArgValue::Number(n) => write!(f, "{n}"),
            ArgValue::Str(s) => f.write_str(s),
            ArgValue::List(items) => f.write_str(&items.join(",")),
            ArgValue::Map(map) => {
                let pairs: Vec<String> = map.iter().map(|(k, v)| format!("{k}={v}")).collect();
                f.write_str(&pairs.join(","))
            }
        }
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        ArgValue::Str(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        ArgValue::Str(value)
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        ArgValue::Number(value)
    }
}

impl From<i64> for ArgValue {
    #[allow(clippy::cast_precision_loss, reason = "CLI counts are far below 2^52")]
    fn from(value: i64) -> Self {
        ArgValue::Number(value as f64)
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        ArgValue::Bool(value)
    }
}

impl From<Vec<String>> for ArgValue {
    fn from(value: Vec<String>) -> Self {
        ArgValue::List(value)
    }
}

impl From<Vec<&str>> for ArgValue {
    fn from(value: Vec<&str>) -> Self {
        ArgValue::List(value.into_iter().map(str::to_string).collect())
    }
}

impl From<BTreeMap<String, String>> for ArgValue {
    fn from(value: BTreeMap<String, String>) -> Self {
        ArgValue::Map(value)
    }
}

/// Parsed command-line arguments for one command invocation
///
/// Deserializes from a JSON/YAML object; `null` entries are dropped so they
/// read as unset.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "BTreeMap<String, Option<ArgValue>>")]
pub struct Namespace {
    values: BTreeMap<String, ArgValue>,
}

impl From<BTreeMap<String, Option<ArgValue>>> for Namespace {
    fn from(raw: BTreeMap<String, Option<ArgValue>>) -> Self {
        Self {
            values: raw
                .into_iter()
                .filter_map(|(key, value)| value.map(|v| (key, v)))
                .collect(),
        }
    }
}

impl Namespace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, handy for tests and the CLI front-end
    #[must_use]
    pub fn with(mut self, field: &str, value: impl Into<ArgValue>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: &str, value: impl Into<ArgValue>) {
        self.values.insert(field.to_string(), value.into());
    }

    pub fn remove(&mut self, field: &str) -> Option<ArgValue> {
        self.values.remove(field)
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&ArgValue> {
        self.values.get(field)
    }

    /// Merge `other` on top of `self`; fields in `other` win
    pub fn merge(&mut self, other: Namespace) {
        self.values.extend(other.values);
    }

    #[must_use]
    pub fn values(&self) -> &BTreeMap<String, ArgValue> {
        &self.values
    }

    /// String field, or None when unset or not a string
    #[must_use]
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(ArgValue::as_str)
    }

    /// Numeric field. Strings are parsed so params files may quote numbers.
    ///
    /// Empty strings read as unset.
    ///
    /// # Errors
    /// Fails when the field holds something that is not a number.
    pub fn get_number(&self, field: &str) -> Result<Option<f64>> {
        match self.get(field) {
            None => Ok(None),
            Some(ArgValue::Number(n)) => Ok(Some(*n)),
            Some(ArgValue::Str(s)) if s.trim().is_empty() => Ok(None),
            Some(ArgValue::Str(s)) => s.trim().parse::<f64>().ok().map(Some).ok_or_else(|| {
                ValidationError::new(format!("{} must be a number", flag_name(field)))
            }),
            Some(_) => Err(ValidationError::new(format!(
                "{} must be a number",
                flag_name(field)
            ))),
        }
    }

    /// Integer field; rejects fractional numbers
    ///
    /// # Errors
    /// Fails when the field holds something that is not a whole number.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "guarded by the fract/range check"
    )]
    pub fn get_integer(&self, field: &str) -> Result<Option<i64>> {
        let Some(value) = self.get_number(field)? else {
            return Ok(None);
        };
        if value.fract() == 0.0 && value.abs() < 9.0e15 {
            Ok(Some(value as i64))
        } else {
            Err(ValidationError::new(format!(
                "{} must be an integer",
                flag_name(field)
            )))
        }
    }

    /// List field; a plain string counts as a one-element list
    #[must_use]
    pub fn get_list(&self, field: &str) -> Option<Vec<String>> {
        match self.get(field)? {
            ArgValue::List(items) => Some(items.clone()),
            ArgValue::Str(s) => Some(vec![s.clone()]),
            _ => None,
        }
    }
}

/// Command-line flag for a namespace field: `max_surge` -> `--max-surge`
#[must_use]
pub fn flag_name(field: &str) -> String {
    format!("--{}", field.replace('_', "-"))
}

/// Read a params file into a namespace
///
/// `.yaml`/`.yml` files are YAML, anything else is JSON. The document must be
/// an object of option name to value.
///
/// # Errors
/// Fails when the file cannot be read or parsed.
pub fn load_params_file(path: &Path) -> anyhow::Result<Namespace> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read params file {}", path.display()))?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
    debug!(path = %path.display(), yaml = is_yaml, "Loading params file");

    if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML params file {}", path.display()))
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON params file {}", path.display()))
    }
}
