use crate::errors::{CloudEventError, Result};
use std::fmt;
use std::str::FromStr;

/// CloudEvents message encodings.
///
/// Only [`Encoding::Binary`] is supported by this crate: the Avro datum
/// occupies the message body and the event attributes travel in transport
/// headers. [`Encoding::Structured`] exists so configuration parsed from
/// external sources can name it, but the encoder rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Binary,
    Structured,
}

impl Encoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Binary => "binary",
            Encoding::Structured => "structured",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "binary" => Ok(Encoding::Binary),
            "structured" => Ok(Encoding::Structured),
            other => Err(format!("unknown encoding: '{}'", other)),
        }
    }
}

/// Immutable codec configuration, built once and shared by the encoder
/// and decoder.
#[derive(Debug, Clone)]
pub struct CodecOptions {
    encoding: Encoding,
    registry_url: String,
    auto_register_schemas: bool,
}

impl CodecOptions {
    pub fn builder() -> CodecOptionsBuilder {
        CodecOptionsBuilder::default()
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Registry base URL, normalized without a trailing slash.
    pub fn registry_url(&self) -> &str {
        &self.registry_url
    }

    pub fn auto_register_schemas(&self) -> bool {
        self.auto_register_schemas
    }
}

#[derive(Debug, Default)]
pub struct CodecOptionsBuilder {
    encoding: Encoding,
    registry_url: Option<String>,
    auto_register_schemas: Option<bool>,
}

impl CodecOptionsBuilder {
    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn registry_url(mut self, url: impl Into<String>) -> Self {
        self.registry_url = Some(url.into());
        self
    }

    /// Whether the encoder registers payload schemas on serialize.
    /// Defaults to true; when false, the schema must already exist in
    /// the registry.
    pub fn auto_register_schemas(mut self, auto_register: bool) -> Self {
        self.auto_register_schemas = Some(auto_register);
        self
    }

    pub fn build(self) -> Result<CodecOptions> {
        let registry_url = self
            .registry_url
            .ok_or_else(|| CloudEventError::InvalidConfig("registry URL is required".into()))?;
        let registry_url = registry_url.trim_end_matches('/').to_string();
        if registry_url.is_empty() {
            return Err(CloudEventError::InvalidConfig(
                "registry URL must not be empty".into(),
            ));
        }

        Ok(CodecOptions {
            encoding: self.encoding,
            registry_url,
            auto_register_schemas: self.auto_register_schemas.unwrap_or(true),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_parses_case_insensitive() {
        assert_eq!("BINARY".parse::<Encoding>().unwrap(), Encoding::Binary);
        assert_eq!(
            "structured".parse::<Encoding>().unwrap(),
            Encoding::Structured
        );
        assert!("json".parse::<Encoding>().is_err());
    }

    #[test]
    fn builder_normalizes_trailing_slash() {
        let options = CodecOptions::builder()
            .registry_url("http://localhost:8081/")
            .build()
            .unwrap();
        assert_eq!(options.registry_url(), "http://localhost:8081");
    }

    #[test]
    fn builder_requires_registry_url() {
        assert!(CodecOptions::builder().build().is_err());
        assert!(CodecOptions::builder().registry_url("/").build().is_err());
    }

    #[test]
    fn builder_defaults() {
        let options = CodecOptions::builder()
            .registry_url("http://localhost:8081")
            .build()
            .unwrap();
        assert_eq!(options.encoding(), Encoding::Binary);
        assert!(options.auto_register_schemas());
    }
}
