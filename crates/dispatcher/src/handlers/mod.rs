//! Handlers - one per content kind

mod metadata;
mod metrics;
mod reconcile;

pub use metadata::MetadataExporter;
pub use metrics::MetricsExporter;
pub use reconcile::IdentifierReconciler;

use contracts::ExportError;
use graph_hash::GraphHashError;

/// Map graph parsing errors onto the unit-level error taxonomy
pub(crate) fn into_payload_error(error: GraphHashError) -> ExportError {
    match error {
        GraphHashError::UnsupportedMediaType { media_type } => {
            ExportError::unsupported_media_type(media_type)
        }
        GraphHashError::Parse { message } => ExportError::invalid_payload(message),
    }
}
