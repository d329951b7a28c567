//! Dispatcher - main loop routing work units to handlers

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument};

use contracts::{ContentKind, ExportHandler, ExportJob, HubEndpoint, ResultSink, WorkUnit};
use hub_client::HubClient;

use crate::handlers::{IdentifierReconciler, MetadataExporter, MetricsExporter};

/// Routes each work unit to exactly one handler
///
/// Reentrant: every unit is handled on its own spawned task, so many units
/// may be in flight at once. No ordering is guaranteed between units; the
/// hub's own last-write-wins semantics govern races on one identifier.
pub struct Dispatcher<M = MetadataExporter, X = MetricsExporter, R = IdentifierReconciler> {
    defaults: HubEndpoint,
    metadata: Arc<M>,
    metrics: Arc<X>,
    reconciler: Arc<R>,
    input_rx: mpsc::Receiver<WorkUnit>,
}

impl Dispatcher {
    /// Create a dispatcher with the production handlers sharing one hub client
    pub fn new(
        client: HubClient,
        defaults: HubEndpoint,
        input_rx: mpsc::Receiver<WorkUnit>,
    ) -> Self {
        Self {
            metadata: Arc::new(MetadataExporter::new(client.clone())),
            metrics: Arc::new(MetricsExporter::new(client.clone())),
            reconciler: Arc::new(IdentifierReconciler::new(client)),
            defaults,
            input_rx,
        }
    }
}

impl<M, X, R> Dispatcher<M, X, R>
where
    M: ExportHandler + Send + Sync + 'static,
    X: ExportHandler + Send + Sync + 'static,
    R: ExportHandler + Send + Sync + 'static,
{
    /// Create a dispatcher with custom handlers (for testing)
    pub fn with_handlers(
        metadata: M,
        metrics: X,
        reconciler: R,
        defaults: HubEndpoint,
        input_rx: mpsc::Receiver<WorkUnit>,
    ) -> Self {
        Self {
            metadata: Arc::new(metadata),
            metrics: Arc::new(metrics),
            reconciler: Arc::new(reconciler),
            defaults,
            input_rx,
        }
    }

    /// Run the dispatcher main loop
    ///
    /// Consumes units until the input channel closes. Units already
    /// dispatched run to completion on their own tasks.
    #[instrument(name = "dispatcher_run", skip(self))]
    pub async fn run(mut self) {
        info!("Dispatcher started");

        let mut unit_count: u64 = 0;

        while let Some(unit) = self.input_rx.recv().await {
            unit_count += 1;
            self.dispatch(unit);
        }

        info!(units = unit_count, "Dispatcher input closed, shutting down");
    }

    /// Spawn the dispatcher as a background task
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    fn dispatch(&self, unit: WorkUnit) {
        let kind = unit.info.content_kind();
        debug!(
            kind = kind.label(),
            catalogue = %unit.info.catalogue,
            "Dispatching work unit"
        );
        observability::record_unit_dispatched(kind.label());

        let (job, sink) = unit.into_job(&self.defaults);
        match kind {
            ContentKind::IdentifierList => {
                spawn_handler(Arc::clone(&self.reconciler), kind, job, sink)
            }
            ContentKind::Metrics => spawn_handler(Arc::clone(&self.metrics), kind, job, sink),
            ContentKind::Metadata => spawn_handler(Arc::clone(&self.metadata), kind, job, sink),
        }
    }
}

fn spawn_handler<H>(handler: Arc<H>, kind: ContentKind, job: ExportJob, sink: ResultSink)
where
    H: ExportHandler + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let result = handler.handle(&job).await;

        match &result {
            Ok(outcome) => {
                observability::record_export_outcome(kind.label(), outcome.label());
            }
            Err(error) => {
                observability::record_unit_failed(kind.label());
                error!(handler = handler.name(), error = %error, "Work unit failed");
            }
        }

        if sink.send(result).is_err() {
            debug!(handler = handler.name(), "Result receiver dropped");
        }
    });
}
