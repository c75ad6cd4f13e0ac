//! Single-turn mode: one question, one reply, then exit.

use super::console::ConsoleRenderer;
use ask_application::{
    GatewayError, SendRejected, SessionController, StreamTransport, TurnOutcome, UiEvent,
};
use ask_domain::{Message, Model, Prompt, Snapshot};
use std::io::{self, Write};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::info;

/// Why a single turn did not produce a reply
#[derive(Error, Debug)]
pub enum OneShotError {
    #[error(transparent)]
    Rejected(#[from] SendRejected),

    #[error("{0}")]
    Failed(String),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Stream one turn through `controller`, rendering each projection as soon
/// as the controller emits it.
pub async fn run_streaming<W: Write>(
    controller: &mut SessionController,
    ui_rx: &mut mpsc::UnboundedReceiver<UiEvent>,
    renderer: &mut ConsoleRenderer<W>,
    question: &str,
) -> Result<String, OneShotError> {
    controller.send(question)?;
    loop {
        let event = controller.next_event().await;
        let outcome = controller.handle_event(event);
        while let Ok(ui_event) = ui_rx.try_recv() {
            renderer.render(&ui_event)?;
        }
        match outcome {
            Some(TurnOutcome::Completed(text)) => return Ok(text),
            Some(TurnOutcome::Failed { cause, .. }) => return Err(OneShotError::Failed(cause)),
            None => {}
        }
    }
}

/// Request the whole reply at once and print it.
pub async fn run_blocking<W: Write>(
    transport: &dyn StreamTransport,
    model: &Model,
    renderer: &mut ConsoleRenderer<W>,
    question: &str,
) -> Result<String, OneShotError> {
    let prompt = Prompt::try_new(question).map_err(SendRejected::from)?;
    let snapshot = Snapshot::from(vec![Message::user(prompt.into_content())]);

    info!(model = %model, "Requesting non-streamed reply");
    renderer.render(&UiEvent::SetSendingIndicator(true))?;
    let result = transport.complete(model, snapshot).await;
    renderer.render(&UiEvent::SetSendingIndicator(false))?;

    let text = result?;
    renderer.print_reply(&text)?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ask_application::{StreamHandle, stream_channel};
    use ask_domain::DomainError;
    use async_trait::async_trait;
    use std::sync::Arc;

    /// Streams a fixed reply and answers `complete` with a fixed result.
    struct FixedTransport {
        chunks: Vec<&'static str>,
        complete: Result<String, GatewayError>,
    }

    #[async_trait]
    impl StreamTransport for FixedTransport {
        fn start_stream(&self, _model: &Model, _snapshot: Snapshot) -> StreamHandle {
            let (sink, handle) = stream_channel(16);
            let chunks = self.chunks.clone();
            tokio::spawn(async move {
                for chunk in &chunks {
                    sink.chunk(*chunk).await;
                }
                sink.end(chunks.concat()).await;
            });
            handle
        }

        async fn complete(
            &self,
            _model: &Model,
            _snapshot: Snapshot,
        ) -> Result<String, GatewayError> {
            self.complete.clone()
        }
    }

    fn renderer() -> ConsoleRenderer<Vec<u8>> {
        colored::control::set_override(false);
        ConsoleRenderer::new(Vec::new(), Model::default()).without_spinner()
    }

    #[tokio::test]
    async fn test_streaming_turn_prints_reply() {
        let transport = Arc::new(FixedTransport {
            chunks: vec!["4", "2"],
            complete: Err(GatewayError::EmptyResponse),
        });
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut controller = SessionController::new(transport, Model::default(), tx);
        let mut renderer = renderer();

        let text = run_streaming(&mut controller, &mut rx, &mut renderer, "6 * 7?")
            .await
            .unwrap();

        assert_eq!(text, "42");
        assert_eq!(controller.conversation().len(), 2);
        let printed = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(printed.ends_with("42\n"));
    }

    #[tokio::test]
    async fn test_blank_question_is_rejected() {
        let transport = FixedTransport {
            chunks: Vec::new(),
            complete: Ok("unused".to_string()),
        };
        let mut renderer = renderer();

        let result = run_blocking(&transport, &Model::default(), &mut renderer, "  ").await;
        assert!(matches!(
            result,
            Err(OneShotError::Rejected(SendRejected::InvalidPrompt(
                DomainError::EmptyPrompt
            )))
        ));
    }

    #[tokio::test]
    async fn test_blocking_turn_maps_gateway_error() {
        let transport = FixedTransport {
            chunks: Vec::new(),
            complete: Err(GatewayError::Api("quota exceeded".to_string())),
        };
        let mut renderer = renderer();

        let result = run_blocking(&transport, &Model::default(), &mut renderer, "hi").await;
        assert!(matches!(result, Err(OneShotError::Gateway(GatewayError::Api(_)))));
    }

    #[tokio::test]
    async fn test_blocking_turn_prints_reply() {
        let transport = FixedTransport {
            chunks: Vec::new(),
            complete: Ok("done".to_string()),
        };
        let mut renderer = renderer();

        let text = run_blocking(&transport, &Model::default(), &mut renderer, "hi")
            .await
            .unwrap();
        assert_eq!(text, "done");
    }
}
