pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::{toml_config::TomlConfig, CliConfig};
pub use crate::core::{
    checks::{arithmetic_check, remote_read_check, Completion},
    suite::Suite,
    testing::{Firestore, TestApp},
};
pub use crate::domain::model::{AppOptions, CheckOutcome, DocumentRef, DocumentSnapshot, SuiteReport};
pub use crate::domain::ports::{ConfigProvider, DocumentStore};
pub use crate::utils::error::{CheckError, Result};
