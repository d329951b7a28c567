//! Layered error definitions
//!
//! Categorized by source: config / payload / transport / hub

use thiserror::Error;

/// Unified error type
///
/// Only hard failures live here; soft failures (identifier fetch rejections,
/// individual delete errors) are logged at their site and never constructed.
#[derive(Debug, Error)]
pub enum ExportError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Payload Errors =====
    /// Required data-info field is absent or empty
    #[error("missing field '{field}' in data info")]
    MissingField { field: String },

    /// Payload could not be parsed for the requested operation
    #[error("invalid payload: {message}")]
    InvalidPayload { message: String },

    /// Media type is not a supported RDF serialization
    #[error("unsupported media type '{media_type}'")]
    UnsupportedMediaType { media_type: String },

    // ===== Transport Errors =====
    /// No response received: DNS, connect, or timeout failure
    #[error("transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ===== Hub Errors =====
    /// Hub answered an upsert with an unexpected status
    #[error("hub rejected '{identifier}': {status} - {status_text} - {body}")]
    HubRejected {
        identifier: String,
        status: u16,
        status_text: String,
        body: String,
    },
}

impl ExportError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create missing-field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create invalid-payload error
    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self::InvalidPayload {
            message: message.into(),
        }
    }

    /// Create unsupported-media-type error
    pub fn unsupported_media_type(media_type: impl Into<String>) -> Self {
        Self::UnsupportedMediaType {
            media_type: media_type.into(),
        }
    }

    /// Create transport error without a typed cause
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Create transport error carrying the underlying cause
    pub fn transport_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Transport {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
