//! Config validation
//!
//! Rules:
//! - address must be non-empty and a parseable URL
//! - api_key may be empty (the hub decides whether it cares)

use contracts::{ExportError, HubEndpoint};
use validator::Validate;

/// Validate a resolved hub endpoint
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(endpoint: &HubEndpoint) -> Result<(), ExportError> {
    if endpoint.address.is_empty() {
        return Err(ExportError::config_validation(
            "address",
            "hub address cannot be empty",
        ));
    }

    endpoint.validate().map_err(|errors| {
        let detail = errors
            .field_errors()
            .into_iter()
            .next()
            .and_then(|(field, errs)| {
                errs.first().map(|e| {
                    (
                        field.to_string(),
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string()),
                    )
                })
            });
        match detail {
            Some((field, message)) => ExportError::config_validation(field, message),
            None => ExportError::config_validation("hub", "invalid hub configuration"),
        }
    })
}
