//! Core error types used across the system

use thiserror::Error;

/// Errors raised by the entity codec
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Failed to encode {entity_type}: {source}")]
    Encode {
        entity_type: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to decode {entity_type}: {source}")]
    Decode {
        entity_type: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl CodecError {
    /// Returns the entity type the failing record was meant to be
    pub fn entity_type(&self) -> &'static str {
        match self {
            CodecError::Encode { entity_type, .. } | CodecError::Decode { entity_type, .. } => {
                entity_type
            }
        }
    }
}
