//! IdentifierReconciler - best-effort deletion sweep
//!
//! Fetches the hub's identifier set for a catalogue, diffs it against the
//! locally supplied set, and deletes every hub record absent locally.
//! Deletes are advisory: individual failures are logged, never promoted to
//! the unit result.

use std::collections::HashSet;

use contracts::{ExportError, ExportHandler, ExportJob, ExportOutcome, HubEndpoint};
use hub_client::HubClient;
use tracing::{error, info, instrument, warn};

/// Reconciles one catalogue's identifier set per job
pub struct IdentifierReconciler {
    client: HubClient,
}

impl IdentifierReconciler {
    /// Create a new IdentifierReconciler
    pub fn new(client: HubClient) -> Self {
        Self { client }
    }
}

impl ExportHandler for IdentifierReconciler {
    fn name(&self) -> &str {
        "reconciler"
    }

    #[instrument(
        name = "reconcile_identifiers",
        skip(self, job),
        fields(catalogue = %job.info.catalogue)
    )]
    async fn handle(&self, job: &ExportJob) -> Result<ExportOutcome, ExportError> {
        let catalogue = &job.info.catalogue;

        let response = self.client.list_source_ids(&job.endpoint, catalogue).await?;
        if response.status != 200 {
            // Reconciliation is advisory; a hub that cannot list identifiers
            // only skips the sweep, it does not fail the unit.
            error!(
                catalogue,
                status = response.status,
                status_text = %response.status_text,
                "Hub identifier listing failed, skipping reconciliation"
            );
            return Ok(ExportOutcome::Reconciled { deleted: 0 });
        }

        let target_ids = match parse_id_array(response.body.as_bytes()) {
            Ok(ids) => ids,
            Err(e) => {
                error!(catalogue, error = %e, "Hub identifier listing unreadable, skipping reconciliation");
                return Ok(ExportOutcome::Reconciled { deleted: 0 });
            }
        };
        let source_ids = parse_id_array(&job.payload)?;

        let target_size = target_ids.len();
        let stale = stale_ids(&source_ids, target_ids);
        info!(
            source = source_ids.len(),
            target = target_size,
            deleting = stale.len(),
            "Reconciling catalogue"
        );

        for identifier in &stale {
            tokio::spawn(delete_stale(
                self.client.clone(),
                job.endpoint.clone(),
                identifier.clone(),
                catalogue.clone(),
            ));
        }

        Ok(ExportOutcome::Reconciled {
            deleted: stale.len(),
        })
    }
}

/// Parse a JSON array of identifier strings into a set
fn parse_id_array(data: &[u8]) -> Result<HashSet<String>, ExportError> {
    serde_json::from_slice::<Vec<String>>(data)
        .map(|ids| ids.into_iter().collect())
        .map_err(|e| ExportError::invalid_payload(format!("identifier list: {e}")))
}

/// Identifiers the hub has that the source no longer has
fn stale_ids(source_ids: &HashSet<String>, target_ids: HashSet<String>) -> Vec<String> {
    target_ids
        .into_iter()
        .filter(|id| !source_ids.contains(id))
        .collect()
}

/// Delete one stale record, fire-and-forget
///
/// Completion is only used for logging and counters, never awaited by the
/// reconciliation result.
async fn delete_stale(
    client: HubClient,
    endpoint: HubEndpoint,
    identifier: String,
    catalogue: String,
) {
    match client.delete_dataset(&endpoint, &identifier, &catalogue).await {
        Ok(response) => match response.status {
            200 => {
                info!(identifier, "Dataset deleted");
                observability::record_delete_result("deleted");
            }
            404 => {
                // Already gone, the catalogues agree
                warn!(identifier, "Dataset not found");
                observability::record_delete_result("not_found");
            }
            status => {
                error!(
                    identifier,
                    status,
                    status_text = %response.status_text,
                    "Delete rejected"
                );
                observability::record_delete_result("rejected");
            }
        },
        Err(e) => {
            error!(identifier, error = %e, "Delete failed");
            observability::record_delete_result("transport_error");
        }
    }
}
