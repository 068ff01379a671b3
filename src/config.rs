//! Service settings: built-in defaults, an optional JSON file, then
//! `CANESCAN_*` environment overrides, in that order.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::MAX_UPLOAD_BYTES;
use crate::error::{Error, Result};
use crate::locale::Locale;

/// Env var naming an optional JSON config file.
pub const CONFIG_ENV: &str = "CANESCAN_CONFIG";

/// Overrides that only matter to the HTTP service.
pub const SERVER_ONLY_ENV: &[&str] = &["CANESCAN_HOST", "CANESCAN_PORT", "CANESCAN_MAX_UPLOAD"];

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "canescan=info,canescan_server=info"
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub model_path: PathBuf,
    pub knowledge_path: PathBuf,
    /// Optional class mapping JSON with `marathi_names` overrides.
    pub class_mapping_path: PathBuf,
    /// Locale used when a request does not name one.
    pub default_locale: Locale,
    pub max_upload_bytes: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            host: "0.0.0.0".into(),
            port: 5000,
            model_path: PathBuf::from("models/canescan_model.json"),
            knowledge_path: PathBuf::from("data/disease_solutions.json"),
            class_mapping_path: PathBuf::from("models/class_mapping.json"),
            default_locale: Locale::default(),
            max_upload_bytes: MAX_UPLOAD_BYTES,
        }
    }
}

impl ServiceConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<ServiceConfig> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Applies `CANESCAN_*` overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("CANESCAN_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("CANESCAN_PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("CANESCAN_PORT: '{}' is not a port", port)))?;
        }
        if let Some(model) = lookup("CANESCAN_MODEL") {
            self.model_path = PathBuf::from(model);
        }
        if let Some(knowledge) = lookup("CANESCAN_KNOWLEDGE") {
            self.knowledge_path = PathBuf::from(knowledge);
        }
        if let Some(mapping) = lookup("CANESCAN_CLASS_MAPPING") {
            self.class_mapping_path = PathBuf::from(mapping);
        }
        if let Some(locale) = lookup("CANESCAN_LOCALE") {
            self.default_locale =
                locale.parse().map_err(|e| Error::Config(format!("CANESCAN_LOCALE: {}", e)))?;
        }
        if let Some(max) = lookup("CANESCAN_MAX_UPLOAD") {
            self.max_upload_bytes = max
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("CANESCAN_MAX_UPLOAD: '{}' is not a byte count", max)))?;
        }
        Ok(())
    }

    /// Resolves the configuration with `lookup` standing in for the
    /// environment, `CANESCAN_CONFIG` included.
    pub fn resolve<F>(lookup: F) -> Result<ServiceConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_ENV) {
            Some(path) => {
                info!(path = %path, "reading config file");
                ServiceConfig::from_file(path)?
            }
            None => ServiceConfig::default(),
        };
        config.apply_env(lookup)?;
        Ok(config)
    }

    /// Resolves the process configuration from the real environment.
    pub fn load() -> Result<ServiceConfig> {
        ServiceConfig::resolve(|key| std::env::var(key).ok())
    }

    /// Like [`ServiceConfig::load`] but skips [`SERVER_ONLY_ENV`], so a bad
    /// port never blocks a one-shot diagnosis.
    pub fn load_offline() -> Result<ServiceConfig> {
        ServiceConfig::resolve(offline(|key| std::env::var(key).ok()))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn offline<F>(lookup: F) -> impl Fn(&str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    move |key: &str| if SERVER_ONLY_ENV.contains(&key) { None } else { lookup(key) }
}
