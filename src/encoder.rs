use crate::config::{CodecOptions, Encoding};
use crate::errors::{CloudEventError, Result};
use crate::event::CloudEvent;
use crate::headers::{Headers, CE_DATASCHEMA_HEADER};
use crate::registry::{RegistryError, SchemaRegistry};
use crate::subject::SubjectNameStrategy;
use crate::wire;
use apache_avro::to_avro_datum;
use std::sync::Arc;
use tracing::{debug, info};

/// Binary-mode CloudEvents encoder.
///
/// Writes the event attributes into the caller's transport headers,
/// serializes the Avro payload into the registry wire framing (making
/// sure the payload schema is registered, or already known, under the
/// subject derived from the destination topic), and records a reference
/// URL to the registered schema version in the `ce_dataschema` header.
#[derive(Debug, Clone)]
pub struct CloudEventEncoder {
    options: CodecOptions,
    registry: Arc<dyn SchemaRegistry>,
    strategy: SubjectNameStrategy,
}

impl CloudEventEncoder {
    /// Fails when `options` selects any encoding other than binary;
    /// structured encoding is not supported.
    pub fn new(options: CodecOptions, registry: Arc<dyn SchemaRegistry>) -> Result<Self> {
        if options.encoding() != Encoding::Binary {
            return Err(CloudEventError::UnsupportedEncoding(options.encoding()));
        }
        debug!(registry_url = %options.registry_url(), "encoder configured");

        Ok(CloudEventEncoder {
            options,
            registry,
            strategy: SubjectNameStrategy::default(),
        })
    }

    /// Replace the default topic-name subject strategy.
    pub fn with_subject_strategy(mut self, strategy: SubjectNameStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Serialize `event` for `topic`, mutating `headers` in place and
    /// returning the framed payload bytes.
    pub async fn encode(
        &self,
        topic: &str,
        headers: &mut Headers,
        event: &CloudEvent,
    ) -> Result<Vec<u8>> {
        // Validate the payload shape before touching headers or the
        // registry, so a bad event leaves no trace.
        let data = event.data().ok_or_else(|| {
            CloudEventError::InvalidArgument(
                "CloudEvent data attribute must be an Avro data envelope".into(),
            )
        })?;

        event.write_headers(headers);
        debug!(topic = %topic, event_id = %event.id(), "attribute headers written");

        let subject = self.strategy.subject_name(topic, false, data.schema_name());
        let canonical = data.canonical_schema();
        let schema_id = if self.options.auto_register_schemas() {
            self.registry.register(&subject, &canonical).await?
        } else {
            self.registry.lookup(&subject, &canonical).await?
        };

        let datum = to_avro_datum(data.schema(), data.value().clone())?;
        let payload = wire::encode(schema_id, &datum);

        let versions = self.registry.list_versions(&subject).await?;
        // Do not assume the listing is ordered; take the highest version.
        let version = versions.iter().max().copied().ok_or_else(|| {
            CloudEventError::Serialization(RegistryError::UnexpectedResponse(format!(
                "no versions listed for subject '{}'",
                subject
            )))
        })?;

        let dataschema = format!(
            "{}/subjects/{}/versions/{}/schema",
            self.options.registry_url(),
            subject,
            version
        );
        headers.insert(CE_DATASCHEMA_HEADER, dataschema);
        info!(subject = %subject, version = %version, "schema reference written");

        Ok(payload)
    }
}
