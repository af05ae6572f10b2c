use crate::config::CodecOptions;
use crate::data::{AvroData, AVRO_MIME_TYPE};
use crate::errors::Result;
use crate::event::CloudEvent;
use crate::headers::Headers;
use crate::registry::SchemaRegistry;
use crate::wire;
use apache_avro::{from_avro_datum, Schema};
use serde::de::DeserializeOwned;
use std::io::Cursor;
use std::sync::Arc;
use tracing::debug;

/// Binary-mode CloudEvents decoder, the mirror of
/// [`CloudEventEncoder`](crate::CloudEventEncoder).
///
/// Reads the writer schema referenced by the payload framing from the
/// registry, decodes the Avro datum, and reconstructs the event from the
/// transport headers with the decoded payload attached.
#[derive(Debug, Clone)]
pub struct CloudEventDecoder {
    options: CodecOptions,
    registry: Arc<dyn SchemaRegistry>,
}

impl CloudEventDecoder {
    pub fn new(options: CodecOptions, registry: Arc<dyn SchemaRegistry>) -> Self {
        debug!(registry_url = %options.registry_url(), "decoder configured");
        CloudEventDecoder { options, registry }
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    /// Decode a message into an event carrying the generic Avro record.
    pub async fn decode(
        &self,
        topic: &str,
        headers: &Headers,
        bytes: &[u8],
    ) -> Result<CloudEvent> {
        let (schema_id, datum) = wire::decode(bytes)?;
        let raw_schema = self.registry.schema_by_id(schema_id).await?;
        let writer_schema = Schema::parse_str(&raw_schema)?;

        let value = from_avro_datum(&writer_schema, &mut Cursor::new(datum), None)?;
        debug!(topic = %topic, schema_id = %schema_id, "decoded avro datum");

        let data = AvroData::new(writer_schema, value)?;
        CloudEvent::from_headers(headers)?
            .data(AVRO_MIME_TYPE, data)
            .build()
    }

    /// Decode a message, resolving the datum against `T`'s reader schema
    /// and materializing a typed record alongside the event.
    pub async fn decode_typed<T>(
        &self,
        topic: &str,
        headers: &Headers,
        bytes: &[u8],
    ) -> Result<(CloudEvent, T)>
    where
        T: apache_avro::AvroSchema + DeserializeOwned,
    {
        let (schema_id, datum) = wire::decode(bytes)?;
        let raw_schema = self.registry.schema_by_id(schema_id).await?;
        let writer_schema = Schema::parse_str(&raw_schema)?;
        let reader_schema = T::get_schema();

        let value = from_avro_datum(&writer_schema, &mut Cursor::new(datum), Some(&reader_schema))?;
        debug!(topic = %topic, schema_id = %schema_id, "decoded avro datum with reader schema");

        let typed = apache_avro::from_value::<T>(&value)?;
        let data = AvroData::new(reader_schema, value)?;
        let event = CloudEvent::from_headers(headers)?
            .data(AVRO_MIME_TYPE, data)
            .build()?;

        Ok((event, typed))
    }
}
