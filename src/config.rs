use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the hosted backend, without trailing slash
    pub url: String,
    /// Public (anon) API key sent with every request
    pub api_key: String,
    /// Storage bucket holding property media
    pub bucket: String,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            bucket: "properties".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Business details shown on the site and used for contact links
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BusinessConfig {
    pub name: String,
    /// Number in international format without `+`, as wa.me expects it
    pub whatsapp_number: String,
    pub phone: String,
    pub email: String,
    pub office: String,
    pub hours: String,
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            name: "Shabeer Land & Home Promoters".to_string(),
            whatsapp_number: "918056987186".to_string(),
            phone: "+91 8056987186".to_string(),
            email: "shabeerkahn1982@gmail.com".to_string(),
            office: "Karur, Tamilnadu".to_string(),
            hours: "Mon-Sat: 9AM-6PM".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub business: BusinessConfig,
}

impl Config {
    /// Load configuration with priority: explicit path, `PROMOTER_CONFIG`, defaults.
    /// Environment overrides are applied last.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let path = explicit_path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os("PROMOTER_CONFIG").map(PathBuf::from));

        let mut config = match path {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("PROMOTER_BACKEND_URL") {
            self.backend.url = url;
        }
        if let Some(key) = lookup("PROMOTER_API_KEY") {
            self.backend.api_key = key;
        }
        if let Some(number) = lookup("PROMOTER_WHATSAPP_NUMBER") {
            self.business.whatsapp_number = number;
        }
    }

    /// Fail early when the backend cannot be reached with these settings
    pub fn require_backend(&self) -> Result<&BackendConfig> {
        if self.backend.url.trim().is_empty() {
            return Err(Error::Config(
                "backend url is not set (PROMOTER_BACKEND_URL)".to_string(),
            ));
        }
        if self.backend.api_key.trim().is_empty() {
            return Err(Error::Config(
                "backend api key is not set (PROMOTER_API_KEY)".to_string(),
            ));
        }
        Ok(&self.backend)
    }
}
