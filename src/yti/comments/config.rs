//! Service configuration.
//!
//! Loaded from an optional JSON file; every field has a default so partial
//! files are accepted.

use std::path::Path;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::yti::comments::error::{CommentsError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Language used when a request names none.
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Preference order for picking a localized text when the requested
    /// language is missing.
    #[serde(default = "default_language_fallbacks")]
    pub language_fallbacks: Vec<String>,

    #[serde(default = "default_public_url")]
    pub public_url: String,

    #[serde(default = "default_context_path")]
    pub context_path: String,

    #[serde(default)]
    pub uri: UriConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            language_fallbacks: default_language_fallbacks(),
            public_url: default_public_url(),
            context_path: default_context_path(),
            uri: UriConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

/// Parts of the canonical resource URIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UriConfig {
    #[serde(default = "default_scheme")]
    pub scheme: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_uri_context_path")]
    pub context_path: String,
}

impl Default for UriConfig {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            host: default_host(),
            context_path: default_uri_context_path(),
        }
    }
}

impl UriConfig {
    pub fn host_address(&self) -> String {
        format!("{}://{}{}", self.scheme, self.host, self.context_path)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportConfig {
    /// IANA zone that exported timestamps are shown in.
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Upper bound for auto-sized column widths, in character units.
    #[serde(default = "default_max_column_width")]
    pub max_column_width: f64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            max_column_width: default_max_column_width(),
        }
    }
}

/// Validated settings handed to the export renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSettings {
    pub timezone: Tz,
    pub max_column_width: f64,
    pub language_fallbacks: Vec<String>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CommentsError::MissingInput(path.to_path_buf()));
        }
        let source = std::fs::read_to_string(path)?;
        Self::from_json_str(&source)
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.export_settings()?;
        if self.default_language.trim().is_empty() {
            return Err(CommentsError::Config("defaultLanguage must not be empty".into()));
        }
        Ok(())
    }

    pub fn export_settings(&self) -> Result<ExportSettings> {
        let timezone: Tz = self
            .export
            .timezone
            .parse()
            .map_err(|error| {
                CommentsError::InvalidTimezone(format!("{}: {error}", self.export.timezone))
            })?;
        if !(self.export.max_column_width > 0.0) {
            return Err(CommentsError::Config(format!(
                "export.maxColumnWidth must be positive, got {}",
                self.export.max_column_width
            )));
        }
        Ok(ExportSettings {
            timezone,
            max_column_width: self.export.max_column_width,
            language_fallbacks: self.language_fallbacks.clone(),
        })
    }

    /// Requested language, or the default when none was given.
    pub fn resolve_language<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested
            .map(str::trim)
            .filter(|language| !language.is_empty())
            .unwrap_or(&self.default_language)
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::Europe::Helsinki,
            max_column_width: default_max_column_width(),
            language_fallbacks: default_language_fallbacks(),
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}

fn default_language_fallbacks() -> Vec<String> {
    vec!["en".to_string(), "fi".to_string(), "sv".to_string()]
}

fn default_public_url() -> String {
    "http://localhost:9701".to_string()
}

fn default_context_path() -> String {
    "/comments-api".to_string()
}

fn default_scheme() -> String {
    "https".to_string()
}

fn default_host() -> String {
    "uri.suomi.fi".to_string()
}

fn default_uri_context_path() -> String {
    "/comments".to_string()
}

fn default_timezone() -> String {
    "Europe/Helsinki".to_string()
}

fn default_max_column_width() -> f64 {
    60.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = Config::from_json_str(
            r#"{"defaultLanguage": "fi", "export": {"timezone": "UTC"}}"#,
        )
        .expect("config parsed");

        assert_eq!(config.default_language, "fi");
        assert_eq!(config.export.max_column_width, 60.0);
        assert_eq!(config.export_settings().expect("settings").timezone, Tz::UTC);
    }

    #[test]
    fn unknown_timezone_is_rejected() {
        let error =
            Config::from_json_str(r#"{"export": {"timezone": "Mars/Olympus"}}"#).unwrap_err();
        assert!(matches!(error, CommentsError::InvalidTimezone(_)));
    }

    #[test]
    fn blank_language_request_uses_default() {
        let config = Config::default();
        assert_eq!(config.resolve_language(Some("  ")), "en");
        assert_eq!(config.resolve_language(Some("sv")), "sv");
        assert_eq!(config.resolve_language(None), "en");
    }
}
