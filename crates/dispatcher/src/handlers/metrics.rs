//! MetricsExporter - idempotent metrics graph upserts

use contracts::{ExportError, ExportHandler, ExportJob, ExportOutcome};
use hub_client::{HubClient, UpsertRequest};
use tracing::{info, instrument};

use super::into_payload_error;

/// Upserts one metrics graph per job via PUT `/metrics/{id}`
///
/// The payload is parsed before sending; a graph that is not well-formed is
/// rejected as a hard failure rather than forwarded to the hub. No hash
/// parameter is ever sent for metrics.
pub struct MetricsExporter {
    client: HubClient,
}

impl MetricsExporter {
    /// Create a new MetricsExporter
    pub fn new(client: HubClient) -> Self {
        Self { client }
    }
}

impl ExportHandler for MetricsExporter {
    fn name(&self) -> &str {
        "metrics"
    }

    #[instrument(
        name = "export_metrics",
        skip(self, job),
        fields(catalogue = %job.info.catalogue)
    )]
    async fn handle(&self, job: &ExportJob) -> Result<ExportOutcome, ExportError> {
        let identifier = job.info.require_identifier()?;

        graph_hash::parse_quads(&job.payload, &job.mime_type).map_err(into_payload_error)?;

        let request = UpsertRequest {
            identifier,
            catalogue: &job.info.catalogue,
            mime_type: &job.mime_type,
            hash: None,
            payload: job.payload.clone(),
        };
        let response = self.client.put_metrics(&job.endpoint, &request).await?;

        match response.status {
            201 => {
                info!(identifier, "Metrics graph created");
                Ok(ExportOutcome::Created)
            }
            200 => {
                info!(identifier, "Metrics graph updated");
                Ok(ExportOutcome::Updated)
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
