pub mod toml_config;

use crate::core::{ConfigProvider, DocumentRef};
use crate::utils::error::Result;
use crate::utils::validation::{emulator_base_url, validate_range, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_PROJECT_ID: &str = "fotarh-956e1";
pub const DEFAULT_EMULATOR_HOST: &str = "localhost:8080";
pub const MAX_TIMEOUT_MS: u64 = 600_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "fotarh-check"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Smoke-check a Firestore emulator with a single document read")
)]
pub struct CliConfig {
    #[cfg_attr(feature = "cli", arg(long, default_value = DEFAULT_PROJECT_ID))]
    pub project_id: String,

    #[cfg_attr(
        feature = "cli",
        arg(long, env = "FIRESTORE_EMULATOR_HOST", default_value = DEFAULT_EMULATOR_HOST)
    )]
    pub emulator_host: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = "bill"))]
    pub collection: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = "testDoc"))]
    pub doc: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = "2000"))]
    pub timeout_ms: u64,

    #[cfg_attr(feature = "cli", arg(long, help = "Read as this signed-in uid"))]
    pub auth_uid: Option<String>,

    #[cfg_attr(feature = "cli", arg(long, help = "Load settings from a TOML file"))]
    pub config: Option<String>,

    #[cfg_attr(feature = "cli", arg(long, help = "Emit JSON log lines"))]
    pub json_logs: bool,

    #[cfg_attr(feature = "cli", arg(long, help = "Enable verbose output"))]
    pub verbose: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            project_id: DEFAULT_PROJECT_ID.to_string(),
            emulator_host: DEFAULT_EMULATOR_HOST.to_string(),
            collection: "bill".to_string(),
            doc: "testDoc".to_string(),
            timeout_ms: 2000,
            auth_uid: None,
            config: None,
            json_logs: false,
            verbose: false,
        }
    }
}

impl ConfigProvider for CliConfig {
    fn project_id(&self) -> &str {
        &self.project_id
    }

    fn emulator_host(&self) -> &str {
        &self.emulator_host
    }

    fn document(&self) -> DocumentRef {
        DocumentRef::new(self.collection.clone(), self.doc.clone())
    }

    fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    fn auth_uid(&self) -> Option<&str> {
        self.auth_uid.as_deref()
    }
}

impl Validate for CliConfig {
    // project id, collection and doc id are left to the emulator
    fn validate(&self) -> Result<()> {
        emulator_base_url("emulator_host", &self.emulator_host)?;
        validate_range("timeout_ms", self.timeout_ms, 1, MAX_TIMEOUT_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_target_fotarh_project() {
        let config = CliConfig::default();
        assert_eq!(config.project_id(), "fotarh-956e1");
        assert_eq!(config.document(), DocumentRef::new("bill", "testDoc"));
        assert_eq!(config.timeout(), Duration::from_millis(2000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_skips_identifiers() {
        let config = CliConfig {
            project_id: String::new(),
            collection: "  ".to_string(),
            doc: "a/b".to_string(),
            ..CliConfig::default()
        };
        assert!(config.validate().is_ok());

        let config = CliConfig {
            timeout_ms: 0,
            ..CliConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_parse_cli_args() {
        let config = CliConfig::parse_from([
            "fotarh-check",
            "--emulator-host",
            "127.0.0.1:9000",
            "--doc",
            "other",
            "--auth-uid",
            "alice",
        ]);
        assert_eq!(config.emulator_host, "127.0.0.1:9000");
        assert_eq!(config.document(), DocumentRef::new("bill", "other"));
        assert_eq!(config.auth_uid(), Some("alice"));
    }
}
