use advice_client::AdviceClient;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::controller::Submission;
use crate::layers::service::events::ServiceEvent;

struct Running {
    request_id: u64,
    token: CancellationToken,
}

/// Runs advice requests off the UI loop. At most one request is live; starting
/// or cancelling one cancels the task of the previous request.
pub(crate) struct AdviceService {
    client: Arc<dyn AdviceClient>,
    event_tx: mpsc::Sender<ServiceEvent>,
    running: Option<Running>,
}

impl AdviceService {
    pub(crate) fn new(client: Arc<dyn AdviceClient>, event_tx: mpsc::Sender<ServiceEvent>) -> Self {
        Self {
            client,
            event_tx,
            running: None,
        }
    }

    pub(crate) fn start(&mut self, submission: Submission) {
        if let Some(previous) = self.running.take() {
            previous.token.cancel();
        }
        let token = CancellationToken::new();
        self.running = Some(Running {
            request_id: submission.request_id,
            token: token.clone(),
        });
        tokio::spawn(run_request(
            Arc::clone(&self.client),
            submission,
            token,
            self.event_tx.clone(),
        ));
    }

    pub(crate) fn cancel(&mut self, request_id: u64) -> bool {
        match self.running.take() {
            Some(running) if running.request_id == request_id => {
                running.token.cancel();
                true
            }
            other => {
                self.running = other;
                false
            }
        }
    }

    /// Forgets the bookkeeping for a request whose result has been delivered.
    pub(crate) fn finish(&mut self, request_id: u64) {
        if self
            .running
            .as_ref()
            .is_some_and(|running| running.request_id == request_id)
        {
            self.running = None;
        }
    }

    #[cfg(test)]
    pub(crate) fn running_request(&self) -> Option<u64> {
        self.running.as_ref().map(|running| running.request_id)
    }

    pub(crate) fn shutdown(&mut self) {
        if let Some(running) = self.running.take() {
            running.token.cancel();
        }
    }
}

async fn run_request(
    client: Arc<dyn AdviceClient>,
    submission: Submission,
    token: CancellationToken,
    event_tx: mpsc::Sender<ServiceEvent>,
) {
    let request_id = submission.request_id;
    tracing::info!(
        event = "advice_requested",
        request_id,
        prompt_len = submission.prompt.len(),
    );
    let started = Instant::now();
    let outcome = tokio::select! {
        _ = token.cancelled() => {
            tracing::info!(event = "advice_abandoned", request_id);
            return;
        }
        outcome = client.generate(&submission.prompt) => outcome,
    };
    let elapsed = Duration::from_millis(started.elapsed().as_millis() as u64);
    tracing::info!(
        event = "advice_settled",
        request_id,
        ok = outcome.is_ok(),
        elapsed = %humantime::format_duration(elapsed),
    );
    if event_tx
        .send(ServiceEvent::AdviceReady {
            request_id,
            outcome,
        })
        .await
        .is_err()
    {
        tracing::debug!(request_id, "ui loop gone, dropping advice");
    }
}
