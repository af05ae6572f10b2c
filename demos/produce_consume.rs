use anyhow::Result;
use cloudevents_avro::{
    AvroData, CloudEvent, CloudEventDecoder, CloudEventEncoder, CodecOptions, Headers,
    MemorySchemaRegistry, AVRO_MIME_TYPE,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

// Define the payload structure; the Avro schema is derived from it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, apache_avro::AvroSchema)]
#[avro(namespace = "com.example.events")]
struct UserEvent {
    user_id: String,
    action: String,
    timestamp: i64,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Swap MemorySchemaRegistry for HttpSchemaRegistry to talk to a
    // real Confluent-compatible registry.
    let registry = Arc::new(MemorySchemaRegistry::new());

    let options = CodecOptions::builder()
        .registry_url("http://localhost:8081")
        .build()?;

    let encoder = CloudEventEncoder::new(options.clone(), registry.clone())?;
    let decoder = CloudEventDecoder::new(options, registry);

    let topic = "user_events";

    // Producer side: wrap the payload and encode
    let payload = UserEvent {
        user_id: "user_1000".into(),
        action: "login".into(),
        timestamp: chrono::Utc::now().timestamp(),
    };

    let event = CloudEvent::builder()
        .id(Uuid::new_v4().to_string())
        .source("/example/users")
        .event_type("com.example.events.UserEvent")
        .time(chrono::Utc::now().fixed_offset())
        .data(AVRO_MIME_TYPE, AvroData::from_record(&payload)?)
        .build()?;

    let mut headers = Headers::new();
    let bytes = encoder.encode(topic, &mut headers, &event).await?;

    println!("📤 Encoded event {} into {} bytes", event.id(), bytes.len());
    for (key, value) in headers.iter() {
        println!("   header {} = {}", key, String::from_utf8_lossy(value));
    }

    // Consumer side: decode with automatic schema resolution
    let (received, decoded): (CloudEvent, UserEvent) =
        decoder.decode_typed(topic, &headers, &bytes).await?;

    println!("📥 Received event {}", received.id());
    println!("   user:   {}", decoded.user_id);
    println!("   action: {}", decoded.action);
    println!("   schema: {}", received.dataschema().unwrap_or("-"));

    assert_eq!(decoded, payload);
    println!("✅ Round trip complete");
    Ok(())
}
