//! Hub endpoint configuration and per-unit override merging

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Built-in hub address used when neither file, environment nor pipe say otherwise
pub const DEFAULT_HUB_ADDRESS: &str = "http://piveau-hub:8080";

/// Resolved hub endpoint triple
///
/// Immutable once resolved for a work unit. Process-wide defaults use the
/// same shape; [`HubEndpoint::resolve`] merges per-unit overrides on top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct HubEndpoint {
    /// Base address of the hub, scheme and authority included
    #[validate(url(message = "hub address must be a valid URL"))]
    pub address: String,

    /// Value of the `Authorization` header, sent verbatim (may be empty)
    pub api_key: String,

    /// Compute and attach a content hash on metadata export when none is supplied
    pub add_hash: bool,
}

impl Default for HubEndpoint {
    fn default() -> Self {
        Self {
            address: DEFAULT_HUB_ADDRESS.to_string(),
            api_key: String::new(),
            add_hash: false,
        }
    }
}

impl HubEndpoint {
    /// Merge per-unit overrides over these defaults
    ///
    /// Pure function: any field present in the overrides wins, everything
    /// else is taken from `self`.
    pub fn resolve(&self, overrides: Option<&HubOverrides>) -> HubEndpoint {
        let mut resolved = self.clone();
        let Some(overrides) = overrides else {
            return resolved;
        };
        if let Some(endpoint) = &overrides.endpoint {
            if let Some(address) = &endpoint.address {
                resolved.address = address.clone();
            }
            if let Some(api_key) = &endpoint.api_key {
                resolved.api_key = api_key.clone();
            }
        }
        if let Some(add_hash) = overrides.add_hash {
            resolved.add_hash = add_hash;
        }
        resolved
    }
}

/// Per-unit `hub` config section, mirroring the pipe wire shape
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HubOverrides {
    /// Endpoint override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<EndpointOverrides>,

    /// Hash-on-export override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_hash: Option<bool>,
}

/// Address and API key override inside [`HubOverrides`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EndpointOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}
