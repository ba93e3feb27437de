//! # Validator Configuration
//!
//! Front-end settings loaded from environment variables.

/// Runtime settings for `aksval`
///
/// All settings have defaults and can be overridden via environment
/// variables; command-line flags override both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Global log level (ERROR, WARN, INFO, DEBUG, TRACE)
    /// Used when `RUST_LOG` is not set
    pub log_level: String,
    /// Log format (json, text)
    pub log_format: String,
    /// Enable color in text format logs
    pub log_enable_color: bool,
    /// Report every failing check instead of stopping at the first one
    pub collect_all: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            log_level: "INFO".to_string(),
            log_format: "text".to_string(),
            log_enable_color: true,
            collect_all: false,
        }
    }
}

impl ValidatorConfig {
    /// Load configuration from environment variables with defaults
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_format: lookup("LOG_FORMAT")
                .map(|v| v.to_lowercase())
                .unwrap_or(defaults.log_format),
            log_enable_color: lookup("LOG_ENABLE_COLOR")
                .map_or(defaults.log_enable_color, |v| parse_bool(&v)),
            collect_all: lookup("AKSVAL_COLLECT_ALL")
                .map_or(defaults.collect_all, |v| parse_bool(&v)),
        }
    }

    #[must_use]
    pub fn json_logs(&self) -> bool {
        self.log_format == "json"
    }
}

/// "true", "1", "yes", "on" (any case) are true; everything else is false
fn parse_bool(value: &str) -> bool {
    let value = value.to_lowercase();
    value == "true" || value == "1" || value == "yes" || value == "on"
}
