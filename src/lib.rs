//! CloudEvents over Avro for schema-registry-backed messaging.
//!
//! Encodes CloudEvents 1.0 whose payload is an Avro record into
//! binary-mode messages: the event attributes travel as transport
//! headers, the body carries the Avro datum in the registry wire
//! framing, and the payload schema is registered in (and referenced
//! from) a Confluent-compatible schema registry via the `ce_dataschema`
//! header. Only binary encoding and spec version 1.0 are supported.
//!
//! ```no_run
//! use cloudevents_avro::{
//!     AvroData, CloudEvent, CloudEventDecoder, CloudEventEncoder, CodecOptions, Headers,
//!     MemorySchemaRegistry, AVRO_MIME_TYPE,
//! };
//! use std::sync::Arc;
//!
//! # #[derive(serde::Serialize, serde::Deserialize, apache_avro::AvroSchema)]
//! # struct OrderPlaced { code: i64 }
//! # async fn example() -> cloudevents_avro::errors::Result<()> {
//! let options = CodecOptions::builder()
//!     .registry_url("http://localhost:8081")
//!     .build()?;
//! let registry = Arc::new(MemorySchemaRegistry::new());
//!
//! let encoder = CloudEventEncoder::new(options.clone(), registry.clone())?;
//! let decoder = CloudEventDecoder::new(options, registry);
//!
//! let event = CloudEvent::builder()
//!     .id("e-1")
//!     .source("/orders/place")
//!     .event_type("org.acme.OrderPlaced")
//!     .data(AVRO_MIME_TYPE, AvroData::from_record(&OrderPlaced { code: 1 })?)
//!     .build()?;
//!
//! let mut headers = Headers::new();
//! let bytes = encoder.encode("orders", &mut headers, &event).await?;
//! let received = decoder.decode("orders", &headers, &bytes).await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod data;
mod decoder;
mod encoder;
pub mod errors;
mod event;
pub mod headers;
mod memory_registry;
mod registry;
mod schema_registry_client;
mod subject;
pub mod wire;

pub use config::{CodecOptions, CodecOptionsBuilder, Encoding};
pub use data::{AvroData, AVRO_MIME_TYPE};
pub use decoder::CloudEventDecoder;
pub use encoder::CloudEventEncoder;
pub use errors::CloudEventError;
pub use event::{CloudEvent, CloudEventBuilder, SPEC_VERSION};
pub use headers::Headers;
pub use memory_registry::MemorySchemaRegistry;
pub use registry::{RegistryError, RegistryResult, SchemaRegistry};
pub use schema_registry_client::HttpSchemaRegistry;
pub use subject::{SchemaName, SubjectNameStrategy};
