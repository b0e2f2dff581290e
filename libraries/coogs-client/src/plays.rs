//! Play-count reporting.

use crate::client::{expect_success, CoogsClient};
use crate::error::Result;
use coogs_playback::{PlayReport, PlayTelemetry};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

impl CoogsClient {
    /// Record one play of a song.
    pub async fn record_play(&self, report: &PlayReport) -> Result<()> {
        let url = self.endpoint("/plays");
        debug!(
            url = %url,
            listener_id = %report.listener_id,
            song_id = %report.song_id,
            "Recording play"
        );

        let response = self.send(self.http.post(&url).json(report)).await?;
        expect_success(response).await
    }
}

/// Play telemetry that posts reports from a background task
///
/// `dispatch` only queues the report. The worker posts reports one at a time
/// and drops the ones that fail. It stops once every reporter clone is gone
/// and the queue is drained.
#[derive(Debug, Clone)]
pub struct PlayCountReporter {
    tx: mpsc::UnboundedSender<PlayReport>,
}

impl PlayCountReporter {
    /// Start the worker on the current tokio runtime.
    pub fn spawn(client: CoogsClient) -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<PlayReport>();

        let handle = tokio::spawn(async move {
            while let Some(report) = rx.recv().await {
                if let Err(e) = client.record_play(&report).await {
                    warn!(
                        listener_id = %report.listener_id,
                        song_id = %report.song_id,
                        error = %e,
                        "Failed to record play"
                    );
                }
            }
            debug!("Play count reporter stopped");
        });

        (Self { tx }, handle)
    }
}

impl PlayTelemetry for PlayCountReporter {
    fn dispatch(&self, report: PlayReport) {
        if self.tx.send(report).is_err() {
            debug!("Play count worker gone, dropping report");
        }
    }
}
