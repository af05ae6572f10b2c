//! Confluent wire framing for registry-backed payloads: a zero magic
//! byte, the big-endian u32 schema id, then the Avro binary datum.

use crate::errors::{CloudEventError, Result};

/// Leading byte of every framed message.
pub const MAGIC_BYTE: u8 = 0;

/// Minimum frame length: magic byte plus schema id.
pub const HEADER_LEN: usize = 5;

/// Frame an Avro datum with the magic byte and schema id.
pub fn encode(schema_id: u32, datum: &[u8]) -> Vec<u8> {
    let mut framed = Vec::with_capacity(HEADER_LEN + datum.len());
    framed.push(MAGIC_BYTE);
    framed.extend_from_slice(&schema_id.to_be_bytes());
    framed.extend_from_slice(datum);
    framed
}

/// Split a framed message into schema id and datum.
pub fn decode(bytes: &[u8]) -> Result<(u32, &[u8])> {
    if bytes.len() < HEADER_LEN {
        return Err(CloudEventError::MalformedPayload(format!(
            "expected at least {} bytes, got {}",
            HEADER_LEN,
            bytes.len()
        )));
    }
    if bytes[0] != MAGIC_BYTE {
        return Err(CloudEventError::MalformedPayload(format!(
            "unknown magic byte {:#04x}",
            bytes[0]
        )));
    }
    let schema_id = u32::from_be_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]);
    Ok((schema_id, &bytes[HEADER_LEN..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_round_trips() {
        let framed = encode(7, b"datum");
        assert_eq!(framed[0], MAGIC_BYTE);
        let (schema_id, datum) = decode(&framed).unwrap();
        assert_eq!(schema_id, 7);
        assert_eq!(datum, b"datum");
    }

    #[test]
    fn empty_datum_is_valid() {
        let framed = encode(u32::MAX, b"");
        let (schema_id, datum) = decode(&framed).unwrap();
        assert_eq!(schema_id, u32::MAX);
        assert!(datum.is_empty());
    }

    #[test]
    fn truncated_frame_is_rejected() {
        let err = decode(&[0, 0, 1]).unwrap_err();
        assert!(err.to_string().contains("malformed payload"));
    }

    #[test]
    fn wrong_magic_byte_is_rejected() {
        let mut framed = encode(1, b"datum");
        framed[0] = 1;
        let err = decode(&framed).unwrap_err();
        assert!(err.to_string().contains("magic byte"));
    }
}
