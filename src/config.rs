//! Configuration file support for pyxis-mcp.
//!
//! Provides YAML-based configuration through `pyxis-mcp.config.yml` files,
//! plus the merge of file values with command-line overrides. The API key
//! is never read from the file.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::cli::Args;
use pyxis_mcp::adapters::outbound::network::{
    normalize_base_url, ClientSettings, DEFAULT_BASE_URL, DEFAULT_TIMEOUT,
};
use pyxis_mcp::shared::Result;

pub const CONFIG_FILENAME: &str = "pyxis-mcp.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub verbose: Option<bool>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Effective server settings after CLI > config file > defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub base_url: String,
    pub timeout: Duration,
    pub verbose: bool,
}

impl ServerSettings {
    pub fn resolve(args: &Args, file: Option<&ConfigFile>) -> Result<Self> {
        let base_url = args
            .base_url
            .clone()
            .or_else(|| file.and_then(|f| f.base_url.clone()))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        validate_base_url(&base_url)?;

        let timeout = args
            .timeout
            .or_else(|| file.and_then(|f| f.timeout_secs))
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        let verbose = args.verbose || file.and_then(|f| f.verbose).unwrap_or(false);

        Ok(Self {
            base_url,
            timeout,
            verbose,
        })
    }

    pub fn client_settings(&self, api_key: String) -> ClientSettings {
        ClientSettings::default()
            .with_api_key(api_key)
            .with_base_url(self.base_url.clone())
            .with_timeout(self.timeout)
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\nHint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\nHint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

fn validate_base_url(base_url: &str) -> Result<()> {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        bail!("Invalid config: base_url must not be empty.");
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        bail!(
            "Invalid config: base_url must start with http:// or https:// (got '{}').",
            trimmed
        );
    }
    normalize_base_url(trimmed)?;
    Ok(())
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.timeout_secs == Some(0) {
        bail!(
            "Invalid config: timeout_secs must be greater than 0.\n\n\
             Hint: Omit the field to use the default of {} seconds.",
            DEFAULT_TIMEOUT.as_secs()
        );
    }
    if let Some(ref base_url) = config.base_url {
        validate_base_url(base_url)?;
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!("Warning: Unknown config field '{}' will be ignored.", key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "config.yml",
            r#"
base_url: http://localhost:9000/api/
timeout_secs: 10
verbose: true
"#,
        );

        let config = load_config_from_path(&path).unwrap();
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:9000/api/"));
        assert_eq!(config.timeout_secs, Some(10));
        assert_eq!(config.verbose, Some(true));
        assert!(config.unknown_fields.is_empty());
    }

    #[test]
    fn test_discover_config_found() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, CONFIG_FILENAME, "timeout_secs: 3\n");

        let config = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.timeout_secs, Some(3));
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        assert!(discover_config(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config_from_path(Path::new("/nonexistent/config.yml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "bad.yml", "invalid: yaml: [[[broken");
        let err = load_config_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "config.yml", "timeout_secs: 0\n");
        let err = load_config_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("timeout_secs must be greater than 0"));
    }

    #[test]
    fn test_invalid_base_urls_rejected() {
        let dir = TempDir::new().unwrap();
        let empty = write_config(&dir, "empty.yml", "base_url: \"  \"\n");
        assert!(load_config_from_path(&empty)
            .unwrap_err()
            .to_string()
            .contains("must not be empty"));

        let ftp = write_config(&dir, "ftp.yml", "base_url: ftp://catalog.example.com/\n");
        assert!(load_config_from_path(&ftp)
            .unwrap_err()
            .to_string()
            .contains("http:// or https://"));
    }

    #[test]
    fn test_unknown_fields_collected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "config.yml",
            r#"
verbose: false
api_key: do-not-put-this-here
retries: 3
"#,
        );

        let config = load_config_from_path(&path).unwrap();
        assert_eq!(config.unknown_fields.len(), 2);
        assert!(config.unknown_fields.contains_key("api_key"));
        assert!(config.unknown_fields.contains_key("retries"));
    }

    #[test]
    fn test_resolve_defaults() {
        let args = Args::try_parse_from(["pyxis-mcp"]).unwrap();
        let settings = ServerSettings::resolve(&args, None).unwrap();
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.timeout, DEFAULT_TIMEOUT);
        assert!(!settings.verbose);
    }

    #[test]
    fn test_resolve_file_over_defaults() {
        let args = Args::try_parse_from(["pyxis-mcp"]).unwrap();
        let file = ConfigFile {
            base_url: Some("http://localhost:1234/".to_string()),
            timeout_secs: Some(7),
            verbose: Some(true),
            ..Default::default()
        };
        let settings = ServerSettings::resolve(&args, Some(&file)).unwrap();
        assert_eq!(settings.base_url, "http://localhost:1234/");
        assert_eq!(settings.timeout, Duration::from_secs(7));
        assert!(settings.verbose);
    }

    #[test]
    fn test_resolve_cli_over_file() {
        let args = Args::try_parse_from([
            "pyxis-mcp",
            "--base-url",
            "https://override.example.com/v1",
            "--timeout",
            "2",
        ])
        .unwrap();
        let file = ConfigFile {
            base_url: Some("http://localhost:1234/".to_string()),
            timeout_secs: Some(7),
            ..Default::default()
        };
        let settings = ServerSettings::resolve(&args, Some(&file)).unwrap();
        assert_eq!(settings.base_url, "https://override.example.com/v1");
        assert_eq!(settings.timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_resolve_rejects_bad_cli_url() {
        let args = Args::try_parse_from(["pyxis-mcp", "--base-url", "catalog.example.com"]).unwrap();
        assert!(ServerSettings::resolve(&args, None).is_err());
    }

    #[test]
    fn test_client_settings_carry_key() {
        let args = Args::try_parse_from(["pyxis-mcp", "--timeout", "4"]).unwrap();
        let settings = ServerSettings::resolve(&args, None).unwrap();
        let client = settings.client_settings("secret".to_string());
        assert_eq!(client.api_key.as_deref(), Some("secret"));
        assert_eq!(client.timeout, Duration::from_secs(4));
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
    }
}
