//! Runtime configuration.
//!
//! Built from defaults, then an optional JSON file, then `SLOW_IP_*`
//! environment variables (a `.env` file is loaded by `main`).

use crate::error::{Result, TableError};
use crate::output::{EmitConfig, TableFormat};
use crate::processing::ShortTokenPolicy;
use crate::source::DEFAULT_SOURCE_URL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Where the CIDR list is downloaded from.
    pub source_url: String,
    /// Read the list from this file instead of downloading it.
    pub source_file: Option<PathBuf>,
    /// Keep a daily copy of the downloaded list here.
    pub cache_dir: Option<PathBuf>,
    /// Use this existing cache file as the list; it is never refreshed.
    pub cache_file: Option<PathBuf>,
    /// Generated table destination.
    pub output_file: PathBuf,
    pub package_name: String,
    pub variable_name: String,
    pub numeric_type: String,
    pub format: TableFormat,
    pub short_tokens: ShortTokenPolicy,
    /// Sort and merge ranges before emitting.
    pub normalize: bool,
}

impl Default for Config {
    fn default() -> Self {
        let emit = EmitConfig::default();
        Config {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            source_file: None,
            cache_dir: None,
            cache_file: None,
            output_file: PathBuf::from("db.go"),
            package_name: emit.package_name,
            variable_name: emit.variable_name,
            numeric_type: emit.numeric_type,
            format: emit.format,
            short_tokens: ShortTokenPolicy::default(),
            normalize: false,
        }
    }
}

impl Config {
    /// Defaults, overlaid with `config_file` if given, overlaid with the process environment.
    pub fn load(config_file: Option<&Path>) -> Result<Config> {
        let config = match config_file {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())
    }

    /// Read a JSON config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Config> {
        log::info!("Reading config file: {}", path.display());
        let json = std::fs::read_to_string(path).map_err(|e| {
            TableError::InvalidConfig(format!("cannot read {}: {e}", path.display()))
        })?;
        let mut deserializer = serde_json::Deserializer::from_str(&json);
        serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
            TableError::InvalidConfig(format!(
                "{}: path={} error={}",
                path.display(),
                e.path(),
                e.inner()
            ))
        })
    }

    /// Override fields from `SLOW_IP_*` variables looked up through `get`.
    pub fn apply_env<F>(mut self, get: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = get("SLOW_IP_URL") {
            self.source_url = v;
        }
        if let Some(v) = get("SLOW_IP_SOURCE_FILE") {
            self.source_file = Some(PathBuf::from(v));
        }
        if let Some(v) = get("SLOW_IP_CACHE_DIR") {
            self.cache_dir = Some(PathBuf::from(v));
        }
        if let Some(v) = get("SLOW_IP_CACHE_FILE") {
            self.cache_file = Some(PathBuf::from(v));
        }
        if let Some(v) = get("SLOW_IP_OUTPUT") {
            self.output_file = PathBuf::from(v);
        }
        if let Some(v) = get("SLOW_IP_PACKAGE") {
            self.package_name = v;
        }
        if let Some(v) = get("SLOW_IP_VARIABLE") {
            self.variable_name = v;
        }
        if let Some(v) = get("SLOW_IP_FORMAT") {
            self.format = v.parse()?;
        }
        if let Some(v) = get("SLOW_IP_SHORT_TOKENS") {
            self.short_tokens = v.parse()?;
        }
        if let Some(v) = get("SLOW_IP_NORMALIZE") {
            self.normalize = parse_bool(&v)?;
        }
        Ok(self)
    }

    pub fn emit_config(&self) -> EmitConfig {
        EmitConfig {
            package_name: self.package_name.clone(),
            variable_name: self.variable_name.clone(),
            numeric_type: self.numeric_type.clone(),
            format: self.format,
        }
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(TableError::InvalidConfig(format!(
            "'{other}' is not a boolean"
        ))),
    }
}
