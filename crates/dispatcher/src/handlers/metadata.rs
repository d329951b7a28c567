//! MetadataExporter - idempotent dataset description upserts

use contracts::{ExportError, ExportHandler, ExportJob, ExportOutcome};
use hub_client::{HubClient, UpsertRequest};
use tracing::{info, instrument};

use super::into_payload_error;

/// Upserts one dataset description per job via PUT `/datasets/{id}`
pub struct MetadataExporter {
    client: HubClient,
}

impl MetadataExporter {
    /// Create a new MetadataExporter
    pub fn new(client: HubClient) -> Self {
        Self { client }
    }

    /// Decide which hash, if any, rides along as the `hash` query parameter
    ///
    /// A hash supplied in the data info always wins; otherwise one is
    /// computed from the payload when the endpoint asks for it. The hash
    /// lets the hub answer 304 for unchanged content without re-parsing.
    fn resolve_hash(job: &ExportJob) -> Result<Option<String>, ExportError> {
        if let Some(hash) = &job.info.hash {
            return Ok(Some(hash.clone()));
        }
        if !job.endpoint.add_hash {
            return Ok(None);
        }
        graph_hash::canonical_hash(&job.payload, &job.mime_type)
            .map(Some)
            .map_err(into_payload_error)
    }
}

impl ExportHandler for MetadataExporter {
    fn name(&self) -> &str {
        "metadata"
    }

    #[instrument(
        name = "export_metadata",
        skip(self, job),
        fields(catalogue = %job.info.catalogue)
    )]
    async fn handle(&self, job: &ExportJob) -> Result<ExportOutcome, ExportError> {
        let identifier = job.info.require_identifier()?;
        let hash = Self::resolve_hash(job)?;

        let request = UpsertRequest {
            identifier,
            catalogue: &job.info.catalogue,
            mime_type: &job.mime_type,
            hash: hash.as_deref(),
            payload: job.payload.clone(),
        };
        let response = self.client.put_dataset(&job.endpoint, &request).await?;

        match response.status {
            201 => {
                info!(identifier, "Dataset created");
                Ok(ExportOutcome::Created)
            }
            200 => {
                info!(identifier, "Dataset updated");
                Ok(ExportOutcome::Updated)
            }
            304 => {
                info!(identifier, "Dataset unchanged, skipped");
                Ok(ExportOutcome::Unchanged)
            }
            status => Err(ExportError::HubRejected {
                identifier: identifier.to_string(),
                status,
                status_text: response.status_text,
                body: response.body,
            }),
        }
    }
}
