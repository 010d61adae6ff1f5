use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::core::lookup::RecipeApi;
use crate::core::message::DisplayMessage;
use crate::core::pipeline::CommandPipeline;

#[derive(Clone, Debug)]
pub enum LookupEvent {
    Completed(Vec<DisplayMessage>),
}

/// Runs pipeline invocations off the UI thread. Each result is sent back
/// tagged with the generation it was started for.
pub struct LookupService<A: RecipeApi + 'static> {
    pipeline: Arc<CommandPipeline<A>>,
    tx: mpsc::UnboundedSender<(LookupEvent, u64)>,
}

impl<A: RecipeApi + 'static> Clone for LookupService<A> {
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
            tx: self.tx.clone(),
        }
    }
}

impl<A: RecipeApi + 'static> LookupService<A> {
    pub fn new(
        pipeline: CommandPipeline<A>,
    ) -> (Self, mpsc::UnboundedReceiver<(LookupEvent, u64)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                pipeline: Arc::new(pipeline),
                tx,
            },
            rx,
        )
    }

    /// Answer `utterance` in the background. Nothing is sent if the token
    /// is cancelled first.
    pub fn spawn_lookup(&self, utterance: String, cancel_token: CancellationToken, generation: u64) {
        let pipeline = Arc::clone(&self.pipeline);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::select! {
                messages = pipeline.respond(&utterance) => {
                    let _ = tx.send((LookupEvent::Completed(messages), generation));
                }
                _ = cancel_token.cancelled() => {
                    debug!(generation, "Lookup cancelled");
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::FakeApi;
    use std::time::Duration;
    use tokio::sync::Notify;

    #[tokio::test]
    async fn completed_lookup_reports_its_generation() {
        let (service, mut rx) = LookupService::new(CommandPipeline::new(FakeApi::default()));
        service.spawn_lookup("help".to_string(), CancellationToken::new(), 7);

        let (event, generation) = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("timed out")
            .expect("channel closed");
        assert_eq!(generation, 7);
        let LookupEvent::Completed(messages) = event;
        assert_eq!(messages.len(), 1);
    }

    #[tokio::test]
    async fn cancelled_lookup_sends_nothing() {
        let gate = Arc::new(Notify::new());
        let api = FakeApi {
            gate: Some(Arc::clone(&gate)),
            ..FakeApi::default()
        };
        let (service, mut rx) = LookupService::new(CommandPipeline::new(api));
        let token = CancellationToken::new();
        service.spawn_lookup("lasagna recipe".to_string(), token.clone(), 1);

        token.cancel();
        gate.notify_waiters();
        drop(service);

        let received = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("timed out");
        assert!(received.is_none());
    }
}
