//! Persisted blob format
//!
//! Stores write `{"state": <allow-listed fields>, "version": N}` as JSON.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    state: T,
    version: u32,
}

pub fn encode<T: Serialize>(state: &T, version: u32) -> DomainResult<Vec<u8>> {
    Ok(serde_json::to_vec(&Envelope { state, version })?)
}

/// Decode a blob, rejecting any version other than `expected_version`
pub fn decode<T: DeserializeOwned>(bytes: &[u8], expected_version: u32) -> DomainResult<T> {
    let envelope: Envelope<T> = serde_json::from_slice(bytes)?;
    if envelope.version != expected_version {
        return Err(DomainError::Conflict(format!(
            "persisted version {} does not match {}",
            envelope.version, expected_version
        )));
    }
    Ok(envelope.state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Counter {
        value: u32,
    }

    #[test]
    fn test_envelope_shape() {
        let bytes = encode(&Counter { value: 3 }, 0).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json, serde_json::json!({"state": {"value": 3}, "version": 0}));
    }

    #[test]
    fn test_version_mismatch() {
        let bytes = encode(&Counter { value: 3 }, 2).unwrap();
        assert!(matches!(decode::<Counter>(&bytes, 1), Err(DomainError::Conflict(_))));
        assert_eq!(decode::<Counter>(&bytes, 2).unwrap(), Counter { value: 3 });
    }

    #[test]
    fn test_garbage_is_serialization_error() {
        assert!(matches!(
            decode::<Counter>(b"not json", 0),
            Err(DomainError::Serialization(_))
        ));
    }
}
