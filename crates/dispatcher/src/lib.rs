//! # Dispatcher
//!
//! Work unit classification and delivery.
//!
//! Responsibilities:
//! - Consume `WorkUnit`s from the pipe transport
//! - Route each unit to exactly one handler by its content tag
//! - Report exactly one success or hard failure per unit

pub mod dispatcher;
pub mod handlers;

pub use contracts::{ContentKind, ExportHandler, WorkUnit};
pub use dispatcher::Dispatcher;
pub use handlers::{IdentifierReconciler, MetadataExporter, MetricsExporter};
