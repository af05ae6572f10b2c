use crate::errors::{CloudEventError, Result};
use crate::subject::SchemaName;
use apache_avro::types::Value;
use apache_avro::Schema;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Content type attached to events whose payload is an Avro record.
pub const AVRO_MIME_TYPE: &str = "application/avro";

/// Typed data envelope: one Avro record value together with its writer
/// schema.
///
/// Constructed immediately before building an event for send, or by the
/// decoder after a receive; never mutated afterwards. The envelope does
/// not produce transport bytes itself: byte production (and with it
/// schema registration) belongs exclusively to the encoder.
#[derive(Debug, Clone, PartialEq)]
pub struct AvroData {
    schema: Schema,
    value: Value,
    name: SchemaName,
}

impl AvroData {
    /// Wrap a record value with its record schema.
    ///
    /// Fails with an invalid-argument error when the schema is not a
    /// record schema or the value is not a record value.
    pub fn new(schema: Schema, value: Value) -> Result<Self> {
        let name = match &schema {
            Schema::Record(record) => SchemaName::new(
                record.name.namespace.clone(),
                record.name.name.clone(),
            ),
            other => {
                return Err(CloudEventError::InvalidArgument(format!(
                    "Avro data requires a record schema, got {:?}",
                    other
                )))
            }
        };
        if !matches!(value, Value::Record(_)) {
            return Err(CloudEventError::InvalidArgument(
                "Avro data must wrap a record value".into(),
            ));
        }

        Ok(AvroData {
            schema,
            value,
            name,
        })
    }

    /// Build an envelope from a typed record deriving
    /// [`apache_avro::AvroSchema`].
    pub fn from_record<T>(record: &T) -> Result<Self>
    where
        T: apache_avro::AvroSchema + Serialize,
    {
        let schema = T::get_schema();
        let value = apache_avro::to_value(record)?;
        Self::new(schema, value)
    }

    /// Materialize the generic record into a typed one.
    pub fn to_typed<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(apache_avro::from_value::<T>(&self.value)?)
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The namespace-qualified name of the wrapped record's schema, the
    /// only piece of schema identity the subject-name strategies consume.
    pub fn schema_name(&self) -> &SchemaName {
        &self.name
    }

    /// Canonical schema JSON, the form registered in the registry.
    pub(crate) fn canonical_schema(&self) -> String {
        self.schema.canonical_form()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize, apache_avro::AvroSchema)]
    #[avro(namespace = "org.acme.events")]
    struct OrderPlaced {
        code: i64,
        name: String,
    }

    #[test]
    fn from_record_captures_schema_name() {
        let data = AvroData::from_record(&OrderPlaced {
            code: 300,
            name: "Nome 300".into(),
        })
        .unwrap();

        assert_eq!(data.schema_name().qualified(), "org.acme.events.OrderPlaced");
        assert!(matches!(data.value(), Value::Record(_)));
    }

    #[test]
    fn to_typed_round_trips_the_record() {
        let expected = OrderPlaced {
            code: 300,
            name: "Nome 300".into(),
        };
        let data = AvroData::from_record(&expected).unwrap();

        let actual: OrderPlaced = data.to_typed().unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn non_record_schema_is_rejected() {
        let schema = Schema::parse_str(r#""string""#).unwrap();
        let result = AvroData::new(schema, Value::String("plain".into()));
        assert!(matches!(result, Err(CloudEventError::InvalidArgument(_))));
    }

    #[test]
    fn non_record_value_is_rejected() {
        let data = AvroData::from_record(&OrderPlaced {
            code: 1,
            name: "x".into(),
        })
        .unwrap();
        let result = AvroData::new(data.schema().clone(), Value::Long(1));
        assert!(matches!(result, Err(CloudEventError::InvalidArgument(_))));
    }
}
