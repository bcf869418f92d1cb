use crate::domain::model::{DocumentRef, DocumentSnapshot};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Anything that can resolve a single document read.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, doc: &DocumentRef) -> Result<DocumentSnapshot>;
}

pub trait ConfigProvider: Send + Sync {
    fn project_id(&self) -> &str;
    fn emulator_host(&self) -> &str;
    fn document(&self) -> DocumentRef;
    fn timeout(&self) -> Duration;
    fn auth_uid(&self) -> Option<&str>;
}
