//! Environment-driven configuration.

use anyhow::{bail, Result};
use fdom_schema::Provisioning;

/// Log line layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub log_format: LogFormat,
    /// Treat warnings as errors.
    pub strict: bool,
    /// Provisioning applied when `autoConfigure` is unset.
    pub auto_configure_default: Provisioning,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_format: LogFormat::Text,
            strict: false,
            auto_configure_default: Provisioning::RequireExisting,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let log_level = lookup("FDCTL_LOG_LEVEL").unwrap_or(defaults.log_level);

        let log_format = match lookup("FDCTL_LOG_FORMAT").as_deref() {
            None | Some("") | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => bail!("FDCTL_LOG_FORMAT must be 'text' or 'json', got '{other}'"),
        };

        let strict = match lookup("FDCTL_STRICT").filter(|v| !v.is_empty()) {
            Some(v) => parse_bool("FDCTL_STRICT", &v)?,
            None => defaults.strict,
        };

        let auto_configure_default = match lookup("FDCTL_AUTO_CONFIGURE_DEFAULT")
            .filter(|v| !v.is_empty())
        {
            Some(v) => Provisioning::from(parse_bool("FDCTL_AUTO_CONFIGURE_DEFAULT", &v)?),
            None => defaults.auto_configure_default,
        };

        Ok(Self {
            log_level,
            log_format,
            strict,
            auto_configure_default,
        })
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value {
        "1" => Ok(true),
        "0" => Ok(false),
        v if v.eq_ignore_ascii_case("true") => Ok(true),
        v if v.eq_ignore_ascii_case("false") => Ok(false),
        other => bail!("{key} must be one of 1, 0, true, false, got '{other}'"),
    }
}
