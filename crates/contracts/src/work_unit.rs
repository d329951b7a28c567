//! WorkUnit - one inbound job and its result channel

use bytes::Bytes;
use tokio::sync::oneshot;

use crate::{DataInfo, ExportError, ExportOutcome, HubEndpoint, HubOverrides};

/// Result reported for one work unit
pub type ExportResult = Result<ExportOutcome, ExportError>;

/// Channel through which a unit's single outcome is reported
pub type ResultSink = oneshot::Sender<ExportResult>;

/// One inbound job
///
/// Created by the pipe transport per inbound message, owned exclusively by
/// one dispatch invocation, consumed when the result is reported.
#[derive(Debug)]
pub struct WorkUnit {
    /// Raw payload bytes
    pub payload: Bytes,

    /// Content type describing the payload's serialization
    pub mime_type: String,

    /// Routing and destination metadata
    pub info: DataInfo,

    /// Per-unit hub overrides from the pipe config, if any
    pub overrides: Option<HubOverrides>,

    /// Outcome channel
    pub result: ResultSink,
}

impl WorkUnit {
    /// Create a unit together with the receiving half of its result channel
    pub fn new(
        payload: Bytes,
        mime_type: impl Into<String>,
        info: DataInfo,
        overrides: Option<HubOverrides>,
    ) -> (Self, oneshot::Receiver<ExportResult>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                payload,
                mime_type: mime_type.into(),
                info,
                overrides,
                result: tx,
            },
            rx,
        )
    }

    /// Split the unit into an endpoint-resolved job and its result sink
    pub fn into_job(self, defaults: &HubEndpoint) -> (ExportJob, ResultSink) {
        let endpoint = defaults.resolve(self.overrides.as_ref());
        (
            ExportJob {
                payload: self.payload,
                mime_type: self.mime_type,
                info: self.info,
                endpoint,
            },
            self.result,
        )
    }
}

/// A work unit after endpoint resolution, as seen by handlers
#[derive(Debug, Clone)]
pub struct ExportJob {
    pub payload: Bytes,
    pub mime_type: String,
    pub info: DataInfo,
    pub endpoint: HubEndpoint,
}
