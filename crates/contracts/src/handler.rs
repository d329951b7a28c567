//! ExportHandler trait - Dispatcher routing target interface

use crate::{ExportError, ExportJob, ExportOutcome};

/// Handler for one content kind
///
/// All handler implementations must implement this trait. Handlers are
/// reentrant: one instance serves many concurrent jobs.
#[trait_variant::make(ExportHandler: Send)]
pub trait LocalExportHandler {
    /// Handler name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Apply one job to the hub and report its single outcome
    ///
    /// # Errors
    /// Returns the unit's hard failure (transport, rejected upsert, invalid payload)
    async fn handle(&self, job: &ExportJob) -> Result<ExportOutcome, ExportError>;
}
