use crate::config::{DEFAULT_EMULATOR_HOST, DEFAULT_PROJECT_ID, MAX_TIMEOUT_MS};
use crate::core::{ConfigProvider, DocumentRef};
use crate::utils::error::{CheckError, Result};
use crate::utils::validation::{emulator_base_url, validate_range, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub emulator: EmulatorSection,
    pub read: ReadSection,
    #[serde(default)]
    pub runner: RunnerSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmulatorSection {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_project_id")]
    pub project_id: String,
    pub auth_uid: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadSection {
    pub collection: String,
    pub doc: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunnerSection {
    pub timeout_ms: Option<u64>,
}

fn default_host() -> String {
    DEFAULT_EMULATOR_HOST.to_string()
}

fn default_project_id() -> String {
    DEFAULT_PROJECT_ID.to_string()
}

fn env_placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"))
}

impl TomlConfig {
    /// Load config from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CheckError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Parse config from a TOML string, substituting `${VAR}` first.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| CheckError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    // unset variables are left as-is
    fn substitute_env_vars(content: &str) -> String {
        env_placeholder()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }
}

impl ConfigProvider for TomlConfig {
    fn project_id(&self) -> &str {
        &self.emulator.project_id
    }

    fn emulator_host(&self) -> &str {
        &self.emulator.host
    }

    fn document(&self) -> DocumentRef {
        DocumentRef::new(self.read.collection.clone(), self.read.doc.clone())
    }

    fn timeout(&self) -> Duration {
        Duration::from_millis(self.runner.timeout_ms.unwrap_or(2000))
    }

    fn auth_uid(&self) -> Option<&str> {
        self.emulator.auth_uid.as_deref()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        emulator_base_url("emulator.host", &self.emulator.host)?;
        if let Some(timeout) = self.runner.timeout_ms {
            validate_range("runner.timeout_ms", timeout, 1, MAX_TIMEOUT_MS)?;
        }
        Ok(())
    }
}
