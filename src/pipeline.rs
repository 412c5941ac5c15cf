use thiserror::Error;
use tokio::{
    sync::mpsc::{self, Receiver, Sender},
    task::{JoinError, JoinHandle},
};
use tokio_util::sync::CancellationToken;

use crate::{PreferenceSource, RenderSink, TelemetryConfig, TelemetrySession};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Error waiting for telemetry pipeline task to complete: {0} -- {0:#?}")]
    JoinError(#[from] JoinError),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PipelineStats {
    /// Payloads received.
    pub batches: u64,
    /// Payloads dropped because they failed to decode.
    pub dropped: u64,
    /// View changes handed to the sink.
    pub changes: u64,
}

pub struct TelemetryPipelineHandle {
    cancel: CancellationToken,
    handle: JoinHandle<(TelemetrySession, PipelineStats)>,
}

impl TelemetryPipelineHandle {
    /// Stops the pipeline task and returns its final state.
    pub async fn stop(self) -> Result<(TelemetrySession, PipelineStats), PipelineError> {
        self.cancel.cancel();
        Ok(self.handle.await?)
    }

    /// Waits until the push channel is closed and every queued payload has
    /// been applied.
    pub async fn join(self) -> Result<(TelemetrySession, PipelineStats), PipelineError> {
        Ok(self.handle.await?)
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Channel carrying push payloads from the transport to the pipeline.
pub fn telemetry_channel(config: &TelemetryConfig) -> (Sender<String>, Receiver<String>) {
    mpsc::channel(config.channel_size.max(1))
}

/// Spawn the consumer loop. Each payload is decoded and applied completely
/// before the next one is received, so the session has a single writer.
pub fn run_telemetry_pipeline<P, S>(
    mut session: TelemetrySession,
    prefs: P,
    mut sink: S,
    mut receiver: Receiver<String>,
    cancel: CancellationToken,
) -> TelemetryPipelineHandle
where
    P: PreferenceSource + Send + 'static,
    S: RenderSink + Send + 'static,
{
    let stop = cancel.clone();
    let handle = tokio::task::spawn(async move {
        let mut stats = PipelineStats::default();
        loop {
            let payload = tokio::select! {
                biased;
                _ = stop.cancelled() => {
                    log::trace!("Received stop signal. Exiting...");
                    break;
                }
                payload = receiver.recv() => match payload {
                    Some(payload) => payload,
                    None => {
                        log::trace!("Push channel closed");
                        break;
                    }
                },
            };

            stats.batches += 1;
            match session.process(&payload, &prefs, &mut sink) {
                Ok(changes) => stats.changes += changes as u64,
                Err(err) => {
                    stats.dropped += 1;
                    log::error!(
                        "Dropping push batch.\n  Payload: [{}]\n  Error: {}",
                        payload,
                        err
                    );
                }
            }
        }
        log::trace!(
            "Exiting telemetry pipeline: {} batches, {} dropped",
            stats.batches,
            stats.dropped
        );
        (session, stats)
    });
    TelemetryPipelineHandle { cancel, handle }
}
