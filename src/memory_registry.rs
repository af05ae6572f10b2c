use crate::registry::{RegistryError, RegistryResult, SchemaRegistry};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::debug;

#[derive(Debug, Clone)]
struct StoredSchema {
    id: u32,
    version: u32,
    schema: String,
}

/// In-process schema registry.
///
/// Keeps the registry semantics the adapter relies on: registering an
/// identical schema under a subject returns the existing id and creates
/// no new version, version numbers start at 1 and grow by one, and
/// version listings come back ascending. Intended for tests and for
/// embedded setups that have no registry service to talk to.
#[derive(Debug)]
pub struct MemorySchemaRegistry {
    subjects: DashMap<String, Vec<StoredSchema>>,
    schemas: DashMap<u32, String>,
    next_id: AtomicU32,
}

impl MemorySchemaRegistry {
    pub fn new() -> Self {
        MemorySchemaRegistry {
            subjects: DashMap::new(),
            schemas: DashMap::new(),
            next_id: AtomicU32::new(1),
        }
    }
}

impl Default for MemorySchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SchemaRegistry for MemorySchemaRegistry {
    async fn register(&self, subject: &str, schema: &str) -> RegistryResult<u32> {
        let mut versions = self.subjects.entry(subject.to_string()).or_default();

        if let Some(existing) = versions.iter().find(|stored| stored.schema == schema) {
            return Ok(existing.id);
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let version = versions.last().map(|stored| stored.version).unwrap_or(0) + 1;
        versions.push(StoredSchema {
            id,
            version,
            schema: schema.to_string(),
        });
        self.schemas.insert(id, schema.to_string());

        debug!(subject = %subject, schema_id = %id, version = %version, "registered schema");
        Ok(id)
    }

    async fn lookup(&self, subject: &str, schema: &str) -> RegistryResult<u32> {
        let versions = self
            .subjects
            .get(subject)
            .ok_or_else(|| RegistryError::SubjectNotFound(subject.to_string()))?;

        versions
            .iter()
            .find(|stored| stored.schema == schema)
            .map(|stored| stored.id)
            .ok_or_else(|| {
                RegistryError::SchemaNotFound(format!("no matching schema under '{}'", subject))
            })
    }

    async fn schema_by_id(&self, schema_id: u32) -> RegistryResult<String> {
        self.schemas
            .get(&schema_id)
            .map(|schema| schema.value().clone())
            .ok_or_else(|| RegistryError::SchemaNotFound(format!("id {}", schema_id)))
    }

    async fn list_versions(&self, subject: &str) -> RegistryResult<Vec<u32>> {
        let versions = self
            .subjects
            .get(subject)
            .ok_or_else(|| RegistryError::SubjectNotFound(subject.to_string()))?;
        Ok(versions.iter().map(|stored| stored.version).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA_A: &str = r#"{"type":"record","name":"A","fields":[{"name":"x","type":"long"}]}"#;
    const SCHEMA_B: &str = r#"{"type":"record","name":"A","fields":[{"name":"x","type":"long"},{"name":"y","type":"string"}]}"#;

    #[tokio::test]
    async fn registering_identical_schema_reuses_id_and_version() {
        let registry = MemorySchemaRegistry::new();
        let first = registry.register("orders-value", SCHEMA_A).await.unwrap();
        let second = registry.register("orders-value", SCHEMA_A).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(
            registry.list_versions("orders-value").await.unwrap(),
            vec![1]
        );
    }

    #[tokio::test]
    async fn new_schema_creates_next_version() {
        let registry = MemorySchemaRegistry::new();
        let first = registry.register("orders-value", SCHEMA_A).await.unwrap();
        let second = registry.register("orders-value", SCHEMA_B).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(
            registry.list_versions("orders-value").await.unwrap(),
            vec![1, 2]
        );
    }

    #[tokio::test]
    async fn schema_by_id_returns_registered_definition() {
        let registry = MemorySchemaRegistry::new();
        let id = registry.register("orders-value", SCHEMA_A).await.unwrap();
        assert_eq!(registry.schema_by_id(id).await.unwrap(), SCHEMA_A);
    }

    #[tokio::test]
    async fn lookup_does_not_register() {
        let registry = MemorySchemaRegistry::new();
        assert!(matches!(
            registry.lookup("orders-value", SCHEMA_A).await,
            Err(RegistryError::SubjectNotFound(_))
        ));

        registry.register("orders-value", SCHEMA_A).await.unwrap();
        assert!(registry.lookup("orders-value", SCHEMA_A).await.is_ok());
        assert!(matches!(
            registry.lookup("orders-value", SCHEMA_B).await,
            Err(RegistryError::SchemaNotFound(_))
        ));
    }

    #[tokio::test]
    async fn unknown_subject_and_id_are_reported() {
        let registry = MemorySchemaRegistry::new();
        assert!(matches!(
            registry.list_versions("missing").await,
            Err(RegistryError::SubjectNotFound(_))
        ));
        assert!(matches!(
            registry.schema_by_id(99).await,
            Err(RegistryError::SchemaNotFound(_))
        ));
    }
}
