//! DataInfo - per-unit routing and destination metadata

use serde::{Deserialize, Serialize};

/// Classification of a work unit's payload
///
/// Unrecognized or absent tags fall through to `Metadata`. This is the
/// documented default path, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Dataset description to upsert
    Metadata,
    /// Metrics graph to upsert
    Metrics,
    /// List of locally known source identifiers to reconcile against the hub
    IdentifierList,
}

impl ContentKind {
    /// Map the wire-level `content` tag to a kind
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("identifierList") => Self::IdentifierList,
            Some("metrics") => Self::Metrics,
            _ => Self::Metadata,
        }
    }

    /// Stable label for logs and metrics
    pub fn label(&self) -> &'static str {
        match self {
            Self::Metadata => "metadata",
            Self::Metrics => "metrics",
            Self::IdentifierList => "identifier_list",
        }
    }
}

/// Destination metadata carried by one work unit
///
/// Mirrors the pipe wire shape; all optional fields stay `None` when absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataInfo {
    /// Target catalogue id on the hub
    pub catalogue: String,

    /// Record identifier, required for upserts, unused for reconciliation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,

    /// Precomputed content hash, takes precedence over local hashing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,

    /// Content classification tag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl DataInfo {
    /// Classify this unit for routing
    pub fn content_kind(&self) -> ContentKind {
        ContentKind::from_tag(self.content.as_deref())
    }

    /// Record identifier or a missing-field error
    pub fn require_identifier(&self) -> Result<&str, crate::ExportError> {
        self.identifier
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| crate::ExportError::missing_field("identifier"))
    }
}
