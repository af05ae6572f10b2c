//! Transport headers for binary-mode CloudEvents.
//!
//! Binary encoding carries the event attributes as message headers while
//! the body holds only the payload bytes. The key names follow the
//! CloudEvents Kafka protocol binding (`ce_` prefix).

pub const CE_ID_HEADER: &str = "ce_id";
pub const CE_SOURCE_HEADER: &str = "ce_source";
pub const CE_TYPE_HEADER: &str = "ce_type";
pub const CE_TIME_HEADER: &str = "ce_time";
pub const CE_SPECVERSION_HEADER: &str = "ce_specversion";
pub const CONTENT_TYPE_HEADER: &str = "content-type";

/// Holds the registry reference URL for the payload schema.
pub const CE_DATASCHEMA_HEADER: &str = "ce_dataschema";

/// Ordered multimap of header keys to byte values.
///
/// Insertion order is preserved and duplicate keys are allowed; reads
/// resolve to the most recently added value for a key, matching the
/// semantics of broker record headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, Vec<u8>)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a header, keeping any existing entries for the same key.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Remove every entry for `key`, then add the new value.
    pub fn insert(&mut self, key: &str, value: impl Into<Vec<u8>>) {
        self.remove(key);
        self.add(key, value);
    }

    /// Remove every entry for `key`.
    pub fn remove(&mut self, key: &str) {
        self.entries.retain(|(k, _)| k != key);
    }

    /// The most recently added value for `key`.
    pub fn last(&self, key: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_slice())
    }

    /// The most recently added value for `key`, as UTF-8.
    pub fn last_str(&self, key: &str) -> Option<&str> {
        self.last(key).and_then(|v| std::str::from_utf8(v).ok())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_resolves_to_most_recent_value() {
        let mut headers = Headers::new();
        headers.add("key", "first");
        headers.add("key", "second");
        assert_eq!(headers.last_str("key"), Some("second"));
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn insert_overwrites_all_entries_for_key() {
        let mut headers = Headers::new();
        headers.add("key", "first");
        headers.add("key", "second");
        headers.add("other", "kept");
        headers.insert("key", "third");
        assert_eq!(headers.last_str("key"), Some("third"));
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.last_str("other"), Some("kept"));
    }

    #[test]
    fn missing_key_yields_none() {
        let headers = Headers::new();
        assert!(headers.last("absent").is_none());
        assert!(headers.is_empty());
    }

    #[test]
    fn last_str_rejects_non_utf8() {
        let mut headers = Headers::new();
        headers.add("raw", vec![0xff, 0xfe]);
        assert!(headers.last("raw").is_some());
        assert!(headers.last_str("raw").is_none());
    }
}
