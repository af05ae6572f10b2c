use crate::data::AvroData;
use crate::errors::{CloudEventError, Result};
use crate::headers::{
    Headers, CE_DATASCHEMA_HEADER, CE_ID_HEADER, CE_SOURCE_HEADER, CE_SPECVERSION_HEADER,
    CE_TIME_HEADER, CE_TYPE_HEADER, CONTENT_TYPE_HEADER,
};
use chrono::{DateTime, FixedOffset};

/// The only CloudEvents spec version this crate produces or accepts.
pub const SPEC_VERSION: &str = "1.0";

/// CloudEvents 1.0 envelope.
///
/// Immutable once built; rebuilds go through [`CloudEventBuilder::from`].
#[derive(Debug, Clone, PartialEq)]
pub struct CloudEvent {
    // Required context attributes
    id: String,
    source: String,
    event_type: String,
    // Optional context attributes
    time: Option<DateTime<FixedOffset>>,
    datacontenttype: Option<String>,
    dataschema: Option<String>,
    // Payload envelope; None for attribute-only events
    data: Option<AvroData>,
}

impl CloudEvent {
    pub fn builder() -> CloudEventBuilder {
        CloudEventBuilder::default()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn time(&self) -> Option<&DateTime<FixedOffset>> {
        self.time.as_ref()
    }

    pub fn datacontenttype(&self) -> Option<&str> {
        self.datacontenttype.as_deref()
    }

    pub fn dataschema(&self) -> Option<&str> {
        self.dataschema.as_deref()
    }

    pub fn data(&self) -> Option<&AvroData> {
        self.data.as_ref()
    }

    /// Write the event attributes as binary-mode transport headers.
    pub fn write_headers(&self, headers: &mut Headers) {
        headers.insert(CE_SPECVERSION_HEADER, SPEC_VERSION);
        headers.insert(CE_ID_HEADER, self.id.as_str());
        headers.insert(CE_SOURCE_HEADER, self.source.as_str());
        headers.insert(CE_TYPE_HEADER, self.event_type.as_str());
        if let Some(time) = &self.time {
            headers.insert(CE_TIME_HEADER, time.to_rfc3339());
        }
        if let Some(datacontenttype) = &self.datacontenttype {
            headers.insert(CONTENT_TYPE_HEADER, datacontenttype.as_str());
        }
        if let Some(dataschema) = &self.dataschema {
            headers.insert(CE_DATASCHEMA_HEADER, dataschema.as_str());
        }
    }

    /// Rebuild the event attributes from binary-mode transport headers.
    ///
    /// Returns a builder with no data attached so the caller can supply
    /// the decoded payload before building.
    pub fn from_headers(headers: &Headers) -> Result<CloudEventBuilder> {
        let specversion = required(headers, CE_SPECVERSION_HEADER)?;
        if specversion != SPEC_VERSION {
            return Err(CloudEventError::InvalidArgument(format!(
                "spec version {} is not supported, only {}",
                specversion, SPEC_VERSION
            )));
        }

        let mut builder = CloudEvent::builder()
            .id(required(headers, CE_ID_HEADER)?)
            .source(required(headers, CE_SOURCE_HEADER)?)
            .event_type(required(headers, CE_TYPE_HEADER)?);

        if let Some(time) = headers.last_str(CE_TIME_HEADER) {
            let time = DateTime::parse_from_rfc3339(time).map_err(|e| {
                CloudEventError::InvalidArgument(format!("invalid {} header: {}", CE_TIME_HEADER, e))
            })?;
            builder = builder.time(time);
        }
        if let Some(datacontenttype) = headers.last_str(CONTENT_TYPE_HEADER) {
            builder = builder.data_content_type(datacontenttype);
        }
        if let Some(dataschema) = headers.last_str(CE_DATASCHEMA_HEADER) {
            builder = builder.dataschema(dataschema);
        }

        Ok(builder)
    }
}

fn required<'a>(headers: &'a Headers, key: &'static str) -> Result<&'a str> {
    let raw = headers
        .last(key)
        .ok_or(CloudEventError::MissingAttribute(key))?;
    std::str::from_utf8(raw).map_err(|_| {
        CloudEventError::InvalidArgument(format!("header '{}' is not valid UTF-8", key))
    })
}

#[derive(Debug, Clone, Default)]
pub struct CloudEventBuilder {
    id: Option<String>,
    source: Option<String>,
    event_type: Option<String>,
    time: Option<DateTime<FixedOffset>>,
    datacontenttype: Option<String>,
    dataschema: Option<String>,
    data: Option<AvroData>,
}

impl CloudEventBuilder {
    /// Start from an existing event, keeping all of its attributes.
    pub fn from(event: &CloudEvent) -> Self {
        CloudEventBuilder {
            id: Some(event.id.clone()),
            source: Some(event.source.clone()),
            event_type: Some(event.event_type.clone()),
            time: event.time,
            datacontenttype: event.datacontenttype.clone(),
            dataschema: event.dataschema.clone(),
            data: event.data.clone(),
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = Some(event_type.into());
        self
    }

    pub fn time(mut self, time: DateTime<FixedOffset>) -> Self {
        self.time = Some(time);
        self
    }

    pub fn data_content_type(mut self, datacontenttype: impl Into<String>) -> Self {
        self.datacontenttype = Some(datacontenttype.into());
        self
    }

    pub fn dataschema(mut self, dataschema: impl Into<String>) -> Self {
        self.dataschema = Some(dataschema.into());
        self
    }

    /// Attach the payload envelope under the given content type.
    pub fn data(mut self, datacontenttype: impl Into<String>, data: AvroData) -> Self {
        self.datacontenttype = Some(datacontenttype.into());
        self.data = Some(data);
        self
    }

    pub fn build(self) -> Result<CloudEvent> {
        let id = self
            .id
            .ok_or_else(|| CloudEventError::InvalidArgument("id attribute is required".into()))?;
        let source = self.source.ok_or_else(|| {
            CloudEventError::InvalidArgument("source attribute is required".into())
        })?;
        let event_type = self
            .event_type
            .ok_or_else(|| CloudEventError::InvalidArgument("type attribute is required".into()))?;

        Ok(CloudEvent {
            id,
            source,
            event_type,
            time: self.time,
            datacontenttype: self.datacontenttype,
            dataschema: self.dataschema,
            data: self.data,
        })
    }
}
