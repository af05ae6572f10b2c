use crate::registry::{RegistryError, RegistryResult, SchemaRegistry};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

const REGISTRY_CONTENT_TYPE: &str = "application/vnd.schemaregistry.v1+json";

#[derive(Debug, Serialize)]
struct SchemaPayload<'a> {
    schema: &'a str,
    #[serde(rename = "schemaType")]
    schema_type: &'a str,
}

#[derive(Debug, Deserialize)]
struct IdResponse {
    id: u32,
}

#[derive(Debug, Deserialize)]
struct SchemaResponse {
    schema: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

/// Client for a Confluent-compatible schema registry over REST.
///
/// Covers exactly the operations the adapter needs; version fetches,
/// compatibility configuration and subject deletion stay with the
/// registry's own tooling.
#[derive(Debug, Clone)]
pub struct HttpSchemaRegistry {
    client: Client,
    base_url: String,
    basic_auth: Option<(String, String)>,
}

impl HttpSchemaRegistry {
    pub fn new(base_url: impl Into<String>) -> RegistryResult<Self> {
        Self::with_options(base_url, None, Duration::from_secs(30))
    }

    /// Build a client with basic-auth credentials and a request timeout.
    pub fn with_options(
        base_url: impl Into<String>,
        basic_auth: Option<(String, String)>,
        timeout: Duration,
    ) -> RegistryResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RegistryError::Network(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(HttpSchemaRegistry {
            client,
            base_url,
            basic_auth,
        })
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.basic_auth {
            Some((username, password)) => request.basic_auth(username, Some(password)),
            None => request,
        }
    }

    async fn error_for(response: reqwest::Response) -> RegistryError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        // Registries answer errors with {"error_code": .., "message": ..},
        // but proxies in front of them may not.
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|parsed| parsed.message)
            .unwrap_or_else(|_| if body.is_empty() { status.to_string() } else { body });
        match status {
            StatusCode::NOT_FOUND => RegistryError::SubjectNotFound(message),
            StatusCode::UNPROCESSABLE_ENTITY => RegistryError::InvalidSchema(message),
            _ => RegistryError::UnexpectedResponse(format!("{}: {}", status, message)),
        }
    }
}

#[async_trait]
impl SchemaRegistry for HttpSchemaRegistry {
    async fn register(&self, subject: &str, schema: &str) -> RegistryResult<u32> {
        let url = format!("{}/subjects/{}/versions", self.base_url, subject);
        let payload = SchemaPayload {
            schema,
            schema_type: "AVRO",
        };

        let response = self
            .authed(self.client.post(&url))
            .header("Content-Type", REGISTRY_CONTENT_TYPE)
            .json(&payload)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }

        let result: IdResponse = response.json().await?;
        info!(subject = %subject, schema_id = %result.id, "registered schema");
        Ok(result.id)
    }

    async fn lookup(&self, subject: &str, schema: &str) -> RegistryResult<u32> {
        let url = format!("{}/subjects/{}", self.base_url, subject);
        let payload = SchemaPayload {
            schema,
            schema_type: "AVRO",
        };

        let response = self
            .authed(self.client.post(&url))
            .header("Content-Type", REGISTRY_CONTENT_TYPE)
            .json(&payload)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }

        let result: IdResponse = response.json().await?;
        debug!(subject = %subject, schema_id = %result.id, "schema already registered");
        Ok(result.id)
    }

    async fn schema_by_id(&self, schema_id: u32) -> RegistryResult<String> {
        let url = format!("{}/schemas/ids/{}", self.base_url, schema_id);

        let response = self
            .authed(self.client.get(&url))
            .header("Accept", REGISTRY_CONTENT_TYPE)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(RegistryError::SchemaNotFound(format!("id {}", schema_id)));
        }
        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }

        let result: SchemaResponse = response.json().await?;
        Ok(result.schema)
    }

    async fn list_versions(&self, subject: &str) -> RegistryResult<Vec<u32>> {
        let url = format!("{}/subjects/{}/versions", self.base_url, subject);

        let response = self
            .authed(self.client.get(&url))
            .header("Accept", REGISTRY_CONTENT_TYPE)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }

        let versions: Vec<u32> = response.json().await?;
        Ok(versions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let registry = HttpSchemaRegistry::new("http://localhost:8081/").unwrap();
        assert_eq!(registry.base_url, "http://localhost:8081");
    }
}
