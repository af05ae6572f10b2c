use async_trait::async_trait;
use thiserror::Error;

pub type RegistryResult<T> = std::result::Result<T, RegistryError>;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("subject not found: {0}")]
    SubjectNotFound(String),

    #[error("schema not found: {0}")]
    SchemaNotFound(String),

    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected registry response: {0}")]
    UnexpectedResponse(String),
}

impl From<reqwest::Error> for RegistryError {
    fn from(err: reqwest::Error) -> Self {
        RegistryError::Network(err.to_string())
    }
}

/// Seam over the schema registry service.
///
/// The adapter needs four operations: register (or reuse) a schema under
/// a subject, look up an existing registration, fetch a schema by its
/// global id, and list a subject's versions. Anything else the registry
/// offers (compatibility modes, deletion, subject listing) is out of
/// scope here.
#[async_trait]
pub trait SchemaRegistry: Send + Sync + std::fmt::Debug {
    /// Register `schema` under `subject`, returning the global schema id.
    /// Registering an identical schema again returns the existing id and
    /// creates no new version.
    async fn register(&self, subject: &str, schema: &str) -> RegistryResult<u32>;

    /// Look up the id of an already registered schema without
    /// registering it.
    async fn lookup(&self, subject: &str, schema: &str) -> RegistryResult<u32>;

    /// Fetch the raw schema definition for a global schema id.
    async fn schema_by_id(&self, schema_id: u32) -> RegistryResult<String>;

    /// List all version numbers registered under `subject`.
    async fn list_versions(&self, subject: &str) -> RegistryResult<Vec<u32>>;
}
