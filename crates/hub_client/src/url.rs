//! Hub URL construction
//!
//! Identifiers are placed as single path segments, so the url crate's
//! segment encoding applies. Base addresses may carry a path prefix or a
//! trailing slash.

use contracts::ExportError;
use reqwest::Url;

/// Build a hub URL from a base address, path segments, and query pairs
pub(crate) fn hub_url(
    address: &str,
    segments: &[&str],
    query: &[(&str, &str)],
) -> Result<Url, ExportError> {
    let mut url = Url::parse(address)
        .map_err(|e| ExportError::config_validation("address", format!("{address}: {e}")))?;

    url.path_segments_mut()
        .map_err(|_| {
            ExportError::config_validation("address", format!("{address}: cannot be a base URL"))
        })?
        .pop_if_empty()
        .extend(segments);

    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }

    Ok(url)
}
