//! HubClient - the shared transport and its four wire operations

use bytes::Bytes;
use contracts::{ExportError, HubEndpoint};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use tracing::{debug, instrument};

use crate::url::hub_url;

/// One upsert call's wire parameters
#[derive(Debug, Clone)]
pub struct UpsertRequest<'a> {
    /// Record identifier, placed as a path segment
    pub identifier: &'a str,
    /// Target catalogue, sent as the `catalogue` query parameter
    pub catalogue: &'a str,
    /// Payload content type, sent as `Content-Type`
    pub mime_type: &'a str,
    /// Content hash, sent as the `hash` query parameter when present
    pub hash: Option<&'a str>,
    /// Raw payload bytes
    pub payload: Bytes,
}

/// What the hub answered
///
/// Handlers own the status-to-outcome mapping; this is the raw material.
#[derive(Debug, Clone)]
pub struct HubResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

/// Shared, stateless HTTP transport to the hub
///
/// Reentrant: one instance serves all in-flight work units. Timeouts are the
/// underlying client's policy; this engine adds none of its own.
#[derive(Debug, Clone, Default)]
pub struct HubClient {
    http: reqwest::Client,
}

impl HubClient {
    /// Create a client with default transport settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a client around a preconfigured reqwest client
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// PUT `{address}/datasets/{identifier}` with catalogue and optional hash
    #[instrument(
        name = "hub_put_dataset",
        skip(self, endpoint, request),
        fields(identifier = %request.identifier, catalogue = %request.catalogue)
    )]
    pub async fn put_dataset(
        &self,
        endpoint: &HubEndpoint,
        request: &UpsertRequest<'_>,
    ) -> Result<HubResponse, ExportError> {
        let mut query = vec![("catalogue", request.catalogue)];
        if let Some(hash) = request.hash {
            query.push(("hash", hash));
        }
        let url = hub_url(&endpoint.address, &["datasets", request.identifier], &query)?;

        debug!(url = %url, "Upserting dataset");

        let response = self
            .http
            .put(url)
            .header(AUTHORIZATION, &endpoint.api_key)
            .header(CONTENT_TYPE, request.mime_type)
            .body(request.payload.clone())
            .send()
            .await
            .map_err(into_transport_error)?;

        read_response(response).await
    }

    /// PUT `{address}/metrics/{identifier}` with catalogue; never a hash
    #[instrument(
        name = "hub_put_metrics",
        skip(self, endpoint, request),
        fields(identifier = %request.identifier, catalogue = %request.catalogue)
    )]
    pub async fn put_metrics(
        &self,
        endpoint: &HubEndpoint,
        request: &UpsertRequest<'_>,
    ) -> Result<HubResponse, ExportError> {
        let url = hub_url(
            &endpoint.address,
            &["metrics", request.identifier],
            &[("catalogue", request.catalogue)],
        )?;

        debug!(url = %url, "Upserting metrics graph");

        let response = self
            .http
            .put(url)
            .header(AUTHORIZATION, &endpoint.api_key)
            .header(CONTENT_TYPE, request.mime_type)
            .body(request.payload.clone())
            .send()
            .await
            .map_err(into_transport_error)?;

        read_response(response).await
    }

    /// GET `{address}/datasets?catalogue={catalogue}&sourceIds=true`
    #[instrument(
        name = "hub_list_source_ids",
        skip(self, endpoint),
        fields(catalogue = %catalogue)
    )]
    pub async fn list_source_ids(
        &self,
        endpoint: &HubEndpoint,
        catalogue: &str,
    ) -> Result<HubResponse, ExportError> {
        let url = hub_url(
            &endpoint.address,
            &["datasets"],
            &[("catalogue", catalogue), ("sourceIds", "true")],
        )?;

        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, &endpoint.api_key)
            .send()
            .await
            .map_err(into_transport_error)?;

        read_response(response).await
    }

    /// DELETE `{address}/datasets/{identifier}?catalogue={catalogue}`
    #[instrument(
        name = "hub_delete_dataset",
        skip(self, endpoint),
        fields(identifier = %identifier, catalogue = %catalogue)
    )]
    pub async fn delete_dataset(
        &self,
        endpoint: &HubEndpoint,
        identifier: &str,
        catalogue: &str,
    ) -> Result<HubResponse, ExportError> {
        let url = hub_url(
            &endpoint.address,
            &["datasets", identifier],
            &[("catalogue", catalogue)],
        )?;

        let response = self
            .http
            .delete(url)
            .header(AUTHORIZATION, &endpoint.api_key)
            .send()
            .await
            .map_err(into_transport_error)?;

        read_response(response).await
    }
}

fn into_transport_error(error: reqwest::Error) -> ExportError {
    ExportError::transport_with_source(error.to_string(), error)
}

async fn read_response(response: reqwest::Response) -> Result<HubResponse, ExportError> {
    let status = response.status();
    let body = response.text().await.map_err(into_transport_error)?;
    Ok(HubResponse {
        status: status.as_u16(),
        status_text: status
            .canonical_reason()
            .unwrap_or_default()
            .to_string(),
        body,
    })
}
