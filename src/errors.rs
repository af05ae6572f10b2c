use crate::config::Encoding;
use crate::registry::RegistryError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CloudEventError>;

#[derive(Debug, Error)]
pub enum CloudEventError {
    #[error("encoding {0} is not supported, only binary encoding is available")]
    UnsupportedEncoding(Encoding),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("missing required attribute header '{0}'")]
    MissingAttribute(&'static str),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("avro error: {0}")]
    Avro(#[from] apache_avro::Error),

    #[error("serialization failed: {0}")]
    Serialization(#[from] RegistryError),
}

impl CloudEventError {
    pub fn registry_cause(&self) -> Option<&RegistryError> {
        match self {
            CloudEventError::Serialization(cause) => Some(cause),
            _ => None,
        }
    }
}
