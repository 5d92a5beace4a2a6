//! # Runtime Configuration Module
//!
//! Process-wide settings every request is built from: the target base URL,
//! the path prefix, the request timeout, extra default headers and an optional
//! schema directory.
//!
//! ## Lifecycle
//!
//! The configuration is assembled at startup (defaults, then an optional YAML
//! file, then environment variables, then CLI flags), validated, and
//! [`install`]ed exactly once. After that it is read-only; [`current`] hands out
//! a shared reference. Building a request before installation fails with
//! [`VerifyError::Config`] instead of silently falling back to defaults.
//!
//! ## Environment Variables
//!
//! | Variable                  | Meaning                          | Default             |
//! |---------------------------|----------------------------------|---------------------|
//! | `RESTVERIFY_BASE_URL`     | Scheme and host of the target    | `https://reqres.in` |
//! | `RESTVERIFY_BASE_PATH`    | Path prefix before every route   | `/api`              |
//! | `RESTVERIFY_TIMEOUT_SECS` | Per-request timeout in seconds   | `10`                |
//! | `RESTVERIFY_SCHEMA_DIR`   | Directory searched for schemas   | unset               |
//!
//! ## Config File
//!
//! ```yaml
//! base_url: https://reqres.in
//! base_path: /api
//! timeout_secs: 10
//! headers:
//!   Accept-Language: en
//! schema_dir: resources/schemes
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use restverify::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::default().with_env_overrides();
//! assert!(config.validate().is_ok());
//! ```

use crate::error::{Result, VerifyError};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://reqres.in";
pub const DEFAULT_BASE_PATH: &str = "/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

static CONFIG: OnceLock<RuntimeConfig> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Scheme and authority of the target API
    pub base_url: String,
    /// Prefix joined in front of every request path
    pub base_path: String,
    /// Upper bound on a single request, connect included
    pub timeout: Duration,
    /// Headers sent with every request
    pub headers: BTreeMap<String, String>,
    /// Directory searched for schema documents before the bundled ones
    pub schema_dir: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            base_path: DEFAULT_BASE_PATH.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            headers: BTreeMap::new(),
            schema_dir: None,
        }
    }
}

/// On-disk shape; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    base_url: Option<String>,
    base_path: Option<String>,
    timeout_secs: Option<u64>,
    headers: BTreeMap<String, String>,
    schema_dir: Option<PathBuf>,
}

impl RuntimeConfig {
    /// Defaults overlaid with environment variables.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Defaults overlaid with a YAML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            VerifyError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml(&content)
            .map_err(|e| VerifyError::Config(format!("{}: {e}", path.display())))
    }

    fn from_yaml(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        let file: ConfigFile = serde_yaml::from_str(content)?;
        let mut config = Self::default();
        if let Some(base_url) = file.base_url {
            config.base_url = base_url;
        }
        if let Some(base_path) = file.base_path {
            config.base_path = base_path;
        }
        if let Some(secs) = file.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        config.headers = file.headers;
        config.schema_dir = file.schema_dir;
        Ok(config)
    }

    /// Apply `RESTVERIFY_*` environment variables on top of `self`.
    ///
    /// Unparsable timeout values are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = env::var("RESTVERIFY_BASE_URL") {
            self.base_url = val;
        }
        if let Ok(val) = env::var("RESTVERIFY_BASE_PATH") {
            self.base_path = val;
        }
        if let Some(secs) = env::var("RESTVERIFY_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            self.timeout = Duration::from_secs(secs);
        }
        if let Ok(val) = env::var("RESTVERIFY_SCHEMA_DIR") {
            self.schema_dir = Some(PathBuf::from(val));
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| VerifyError::Config(format!("invalid base_url '{}': {e}", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(VerifyError::Config(format!(
                "base_url '{}' must use http or https",
                self.base_url
            )));
        }
        if self.timeout.is_zero() {
            return Err(VerifyError::Config("timeout must be greater than zero".into()));
        }
        Ok(())
    }

    /// `base_url` and `base_path` joined without doubled or missing slashes.
    pub fn root_uri(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = self.base_path.trim_matches('/');
        if path.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{path}")
        }
    }
}

/// Install the process-wide configuration. Only the first call succeeds.
pub fn install(config: RuntimeConfig) -> Result<&'static RuntimeConfig> {
    config.validate()?;
    let mut installed = false;
    let current = CONFIG.get_or_init(|| {
        installed = true;
        config
    });
    if installed {
        Ok(current)
    } else {
        Err(VerifyError::Config(
            "runtime configuration is already installed".into(),
        ))
    }
}

/// The installed configuration, or an error when nothing was installed yet.
pub fn current() -> Result<&'static RuntimeConfig> {
    CONFIG.get().ok_or_else(|| {
        VerifyError::Config("runtime configuration has not been installed".into())
    })
}
