//! Client Configuration
//!
//! Everything a client instance is fixed to for its lifetime: the router
//! endpoint and credential, how session keys are generated, the capture
//! settings and the optional greeting.
//!
//! # Sources
//!
//! Later sources override earlier ones:
//!
//! 1. Built-in defaults
//! 2. TOML file (`--config <path>` or `$XDG_CONFIG_HOME/agent-chat/config.toml`)
//! 3. Environment variables
//! 4. Command-line overrides ([`ConfigOverrides`])
//!
//! ```toml
//! [backend]
//! endpoint = "http://127.0.0.1:8787/agent"
//! credential = "rk-robot-1"
//!
//! [session]
//! prefix = "web-demo-"
//!
//! [capture]
//! duration_ms = 3000
//! format = "wav"
//!
//! [ui]
//! greeting = "Hello! How can I help you?"
//! ```
//!
//! # Environment Variables
//!
//! - `AGENT_CHAT_ENDPOINT`: router endpoint URL
//! - `AGENT_CHAT_CREDENTIAL`: bearer credential
//! - `AGENT_CHAT_SESSION_PREFIX`: session key prefix
//! - `AGENT_CHAT_CAPTURE_MS`: recording length in milliseconds

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::backend::BackendConfig;
use crate::capture::{AudioFormat, CaptureConfig};
use crate::session::DEFAULT_SESSION_PREFIX;

/// Greeting shown when a surface starts
pub const DEFAULT_GREETING: &str = "Hello! I am your agent. How can I help you?";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        source: toml::de::Error,
    },

    /// A value is out of range
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Resolved client configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Router endpoint and credential
    pub backend: BackendConfig,
    /// Prefix for the generated session key
    pub session_prefix: String,
    /// Recording settings
    pub capture: CaptureConfig,
    /// Assistant greeting appended on start (None = no greeting)
    pub greeting: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            session_prefix: DEFAULT_SESSION_PREFIX.to_string(),
            capture: CaptureConfig::default(),
            greeting: Some(DEFAULT_GREETING.to_string()),
        }
    }
}

impl ClientConfig {
    /// Create configuration from defaults and environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Apply environment variable overrides
    pub fn apply_env(&mut self) {
        self.apply_env_from(|name| std::env::var(name).ok());
    }

    /// Apply overrides from an environment lookup
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(endpoint) = lookup("AGENT_CHAT_ENDPOINT") {
            self.backend.endpoint = endpoint;
        }
        if let Some(credential) = lookup("AGENT_CHAT_CREDENTIAL") {
            self.backend.credential = credential;
        }
        if let Some(prefix) = lookup("AGENT_CHAT_SESSION_PREFIX") {
            self.session_prefix = prefix;
        }
        if let Some(raw) = lookup("AGENT_CHAT_CAPTURE_MS") {
            match raw.parse() {
                Ok(ms) => self.capture.duration_ms = ms,
                Err(_) => tracing::warn!(value = %raw, "Ignoring invalid AGENT_CHAT_CAPTURE_MS"),
            }
        }
    }

    /// Apply command-line overrides
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(ref endpoint) = overrides.endpoint {
            self.backend.endpoint.clone_from(endpoint);
        }
        if let Some(ref credential) = overrides.credential {
            self.backend.credential.clone_from(credential);
        }
        if let Some(ref prefix) = overrides.session_prefix {
            self.session_prefix.clone_from(prefix);
        }
        if let Some(ms) = overrides.capture_ms {
            self.capture.duration_ms = ms;
        }
        if overrides.no_greeting {
            self.greeting = None;
        }
    }

    /// Check values that would make every dispatch fail
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = &self.backend.endpoint;
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "endpoint must be an http(s) URL: {endpoint}"
            )));
        }
        if self.capture.duration_ms == 0 {
            return Err(ConfigError::Invalid(
                "capture duration must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Command-line overrides
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Router endpoint
    pub endpoint: Option<String>,
    /// Bearer credential
    pub credential: Option<String>,
    /// Session key prefix
    pub session_prefix: Option<String>,
    /// Recording length in milliseconds
    pub capture_ms: Option<u64>,
    /// Disable the start greeting
    pub no_greeting: bool,
}

/// Where the file layer of the configuration came from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigSource {
    /// No file was read
    Defaults,
    /// Loaded from this file
    File(PathBuf),
}

/// On-disk configuration file
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientToml {
    /// `[backend]`
    pub backend: BackendSection,
    /// `[session]`
    pub session: SessionSection,
    /// `[capture]`
    pub capture: CaptureSection,
    /// `[ui]`
    pub ui: UiSection,
}

/// `[backend]` section
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackendSection {
    /// Router endpoint URL
    pub endpoint: Option<String>,
    /// Bearer credential
    pub credential: Option<String>,
}

/// `[session]` section
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionSection {
    /// Session key prefix
    pub prefix: Option<String>,
}

/// `[capture]` section
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaptureSection {
    /// Recording length in milliseconds
    pub duration_ms: Option<u64>,
    /// Container format
    pub format: Option<AudioFormat>,
}

/// `[ui]` section
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiSection {
    /// Greeting text (empty string disables it)
    pub greeting: Option<String>,
}

impl ClientToml {
    /// Layer this file over an existing configuration
    pub fn apply(self, config: &mut ClientConfig) {
        if let Some(endpoint) = self.backend.endpoint {
            config.backend.endpoint = endpoint;
        }
        if let Some(credential) = self.backend.credential {
            config.backend.credential = credential;
        }
        if let Some(prefix) = self.session.prefix {
            config.session_prefix = prefix;
        }
        if let Some(ms) = self.capture.duration_ms {
            config.capture.duration_ms = ms;
        }
        if let Some(format) = self.capture.format {
            config.capture.format = format;
        }
        if let Some(greeting) = self.ui.greeting {
            config.greeting = (!greeting.is_empty()).then_some(greeting);
        }
    }
}

/// Default configuration file path
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("agent-chat").join("config.toml"))
}

/// Load defaults plus a configuration file (no environment)
pub fn load_config_from_path(path: &Path) -> Result<ClientConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file: ClientToml = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let mut config = ClientConfig::default();
    file.apply(&mut config);
    Ok(config)
}

/// Load the full configuration: defaults, file, then environment
///
/// An explicit path must exist. The default path is optional.
pub fn load_config(explicit: Option<&Path>) -> Result<(ClientConfig, ConfigSource), ConfigError> {
    let (mut config, source) = match explicit {
        Some(path) => (load_config_from_path(path)?, ConfigSource::File(path.to_path_buf())),
        None => match default_config_path().filter(|p| p.exists()) {
            Some(path) => {
                let config = load_config_from_path(&path)?;
                (config, ConfigSource::File(path))
            }
            None => (ClientConfig::default(), ConfigSource::Defaults),
        },
    };

    config.apply_env();
    tracing::debug!(?source, endpoint = %config.backend.endpoint, "Configuration loaded");
    Ok((config, source))
}
