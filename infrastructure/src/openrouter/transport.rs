//! HTTP adapter for OpenRouter-compatible chat-completions endpoints.

use super::error::{Result, TransportError};
use super::protocol::{ChatRequest, CompletionResponse};
use super::sse::{SseDecoder, pump};
use crate::config::FileProviderConfig;
use ask_application::{
    GatewayError, StreamHandle, StreamPolicy, StreamSink, StreamTransport, stream_channel,
};
use ask_domain::{Model, Snapshot};
use async_trait::async_trait;
use futures::TryStreamExt;
use std::fmt;
use std::io;
use std::time::Duration;
use tokio_util::io::StreamReader;
use tracing::{debug, info, warn};

/// Bearer token for the provider
///
/// Never printed; `Debug` is redacted.
#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Read the key from the environment variable `var`.
    pub fn from_env(var: &str) -> Result<Self> {
        std::env::var(var)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(Self)
            .ok_or_else(|| TransportError::CredentialMissing(var.to_string()))
    }

    fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Endpoint settings for [`OpenRouterTransport`]
#[derive(Debug, Clone)]
pub struct OpenRouterSettings {
    pub endpoint: String,
    pub referer: String,
    pub title: String,
    pub timeout: Duration,
}

impl From<&FileProviderConfig> for OpenRouterSettings {
    fn from(config: &FileProviderConfig) -> Self {
        Self {
            endpoint: config.base_url.clone(),
            referer: config.referer.clone(),
            title: config.title.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }
}

/// [`StreamTransport`] over HTTPS
///
/// Every started stream runs on its own tokio task that owns the response
/// body and the producer half of the event channel.
pub struct OpenRouterTransport {
    client: reqwest::Client,
    settings: OpenRouterSettings,
    api_key: ApiKey,
    policy: StreamPolicy,
}

impl OpenRouterTransport {
    pub fn new(settings: OpenRouterSettings, api_key: ApiKey, policy: StreamPolicy) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()?;
        info!(endpoint = %settings.endpoint, "HTTP transport ready");
        Ok(Self {
            client,
            settings,
            api_key,
            policy,
        })
    }

    fn request(&self, model: &Model, snapshot: &Snapshot, stream: bool) -> reqwest::RequestBuilder {
        let body = ChatRequest {
            model: model.as_str(),
            messages: snapshot,
            stream,
        };
        self.client
            .post(&self.settings.endpoint)
            .bearer_auth(self.api_key.expose())
            .header("HTTP-Referer", &self.settings.referer)
            .header("X-Title", &self.settings.title)
            .json(&body)
    }
}

#[async_trait]
impl StreamTransport for OpenRouterTransport {
    fn start_stream(&self, model: &Model, snapshot: Snapshot) -> StreamHandle {
        let (sink, handle) = stream_channel(self.policy.channel_capacity);
        let request = self.request(model, &snapshot, true);
        let decoder = SseDecoder::new(&self.policy);

        debug!(model = %model, messages = snapshot.len(), "Starting stream");
        tokio::spawn(stream_response(request, decoder, sink));
        handle
    }

    async fn complete(
        &self,
        model: &Model,
        snapshot: Snapshot,
    ) -> std::result::Result<String, GatewayError> {
        debug!(model = %model, messages = snapshot.len(), "Requesting completion");
        let response = self
            .request(model, &snapshot, false)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        if !status.is_success() {
            return Err(GatewayError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: CompletionResponse =
            serde_json::from_str(&body).map_err(|e| GatewayError::Decode(e.to_string()))?;
        if let Some(error) = parsed.error {
            return Err(GatewayError::Api(error.message));
        }
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
            .ok_or(GatewayError::EmptyResponse)
    }
}

/// Producer task body for one stream.
async fn stream_response(request: reqwest::RequestBuilder, decoder: SseDecoder, sink: StreamSink) {
    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => {
            warn!("Request failed: {}", e);
            sink.fail_with(GatewayError::Transport(e.to_string())).await;
            return;
        }
    };

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!("Endpoint returned {}", status);
        sink.fail_with(GatewayError::HttpStatus {
            status: status.as_u16(),
            body,
        })
        .await;
        return;
    }

    let body = response.bytes_stream().map_err(io::Error::other);
    pump(StreamReader::new(body), decoder, sink).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use ask_domain::{Message, StreamErrorKind, StreamEvent};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    // ==================== Test Server ====================

    /// Serve exactly one canned HTTP response and hand back the raw request.
    async fn serve_once(status: u16, content_type: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/api/v1/chat/completions", listener.local_addr().unwrap());
        let response = format!(
            "HTTP/1.1 {status} Canned\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });
        (url, handle)
    }

    /// Read headers plus a `Content-Length` body.
    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut data = Vec::new();
        let mut buffer = [0_u8; 4096];
        loop {
            let n = socket.read(&mut buffer).await.unwrap();
            if n == 0 {
                break;
            }
            data.extend_from_slice(&buffer[..n]);
            let text = String::from_utf8_lossy(&data).to_string();
            if let Some(header_end) = text.find("\r\n\r\n") {
                let length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let lower = line.to_ascii_lowercase();
                        lower
                            .strip_prefix("content-length:")
                            .map(|v| v.trim().parse::<usize>().unwrap())
                    })
                    .unwrap_or(0);
                if data.len() >= header_end + 4 + length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&data).to_string()
    }

    fn transport(url: &str) -> OpenRouterTransport {
        let settings = OpenRouterSettings {
            endpoint: url.to_string(),
            referer: "https://example.test/ask".to_string(),
            title: "Ask Test".to_string(),
            timeout: Duration::from_secs(5),
        };
        OpenRouterTransport::new(settings, ApiKey::new("test-key"), StreamPolicy::default())
            .unwrap()
    }

    fn snapshot() -> Snapshot {
        Snapshot::from(vec![Message::user("hello")])
    }

    async fn collect(mut handle: StreamHandle) -> Vec<StreamEvent> {
        let mut events = Vec::new();
        while let Some(event) = handle.recv().await {
            events.push(event);
        }
        events
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_stream_sends_headers_and_decodes_body() {
        let body = "data: {\"choices\":[{\"delta\":{\"content\":\"Hel\"}}]}\n\n\
                    data: {\"choices\":[{\"delta\":{\"content\":\"lo\"}}]}\n\n\
                    data: [DONE]\n\n";
        let (url, server) = serve_once(200, "text/event-stream", body).await;

        let handle = transport(&url).start_stream(&Model::default(), snapshot());
        let events = collect(handle).await;

        assert_eq!(
            events,
            vec![
                StreamEvent::Chunk("Hel".to_string()),
                StreamEvent::Chunk("lo".to_string()),
                StreamEvent::End("Hello".to_string()),
            ]
        );

        let request = server.await.unwrap();
        let lower = request.to_ascii_lowercase();
        assert!(request.starts_with("POST /api/v1/chat/completions"));
        assert!(lower.contains("authorization: bearer test-key"));
        assert!(lower.contains("http-referer: https://example.test/ask"));
        assert!(lower.contains("x-title: ask test"));
        assert!(lower.contains("content-type: application/json"));
        assert!(request.contains("\"stream\":true"));
        assert!(request.contains("{\"role\":\"user\",\"content\":\"hello\"}"));
    }

    #[tokio::test]
    async fn test_stream_non_success_status_carries_body() {
        let (url, server) =
            serve_once(429, "application/json", "{\"error\":\"slow down\"}").await;

        let events = collect(transport(&url).start_stream(&Model::default(), snapshot())).await;

        assert_eq!(events.len(), 1);
        match &events[0] {
            StreamEvent::Error { cause, kind } => {
                assert_eq!(*kind, StreamErrorKind::HttpStatus);
                assert!(cause.contains("429"));
                assert!(cause.contains("slow down"));
            }
            other => panic!("expected error, got {other:?}"),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_stream_connection_failure_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/", listener.local_addr().unwrap());
        drop(listener);

        let events = collect(transport(&url).start_stream(&Model::default(), snapshot())).await;

        assert!(matches!(
            events.as_slice(),
            [StreamEvent::Error { kind: StreamErrorKind::Transport, .. }]
        ));
    }

    #[tokio::test]
    async fn test_complete_returns_message_content() {
        let (url, server) = serve_once(
            200,
            "application/json",
            "{\"choices\":[{\"message\":{\"role\":\"assistant\",\"content\":\"Hi there\"}}]}",
        )
        .await;

        let text = transport(&url)
            .complete(&Model::default(), snapshot())
            .await
            .unwrap();

        assert_eq!(text, "Hi there");
        assert!(server.await.unwrap().contains("\"stream\":false"));
    }

    #[tokio::test]
    async fn test_complete_maps_api_error() {
        let (url, _server) = serve_once(
            200,
            "application/json",
            "{\"error\":{\"message\":\"model not found\"}}",
        )
        .await;

        let result = transport(&url).complete(&Model::default(), snapshot()).await;
        assert_eq!(result, Err(GatewayError::Api("model not found".to_string())));
    }

    #[tokio::test]
    async fn test_complete_maps_empty_choices_and_bad_json() {
        let (url, _server) = serve_once(200, "application/json", "{\"choices\":[]}").await;
        let result = transport(&url).complete(&Model::default(), snapshot()).await;
        assert_eq!(result, Err(GatewayError::EmptyResponse));

        let (url, _server) = serve_once(200, "application/json", "<html>").await;
        let result = transport(&url).complete(&Model::default(), snapshot()).await;
        assert!(matches!(result, Err(GatewayError::Decode(_))));
    }

    #[tokio::test]
    async fn test_complete_maps_http_status() {
        let (url, _server) = serve_once(401, "application/json", "unauthorized").await;
        let result = transport(&url).complete(&Model::default(), snapshot()).await;
        assert_eq!(
            result,
            Err(GatewayError::HttpStatus {
                status: 401,
                body: "unauthorized".to_string(),
            })
        );
    }

    #[test]
    fn test_api_key_debug_is_redacted() {
        let key = ApiKey::new("sk-secret");
        assert_eq!(format!("{:?}", key), "ApiKey(***)");
    }

    #[test]
    fn test_missing_credential() {
        let result = ApiKey::from_env("ASK_TEST_SURELY_UNSET_VARIABLE");
        assert!(matches!(
            result,
            Err(TransportError::CredentialMissing(var)) if var == "ASK_TEST_SURELY_UNSET_VARIABLE"
        ));
    }

    #[test]
    fn test_settings_from_provider_config() {
        let config = FileProviderConfig::default();
        let settings = OpenRouterSettings::from(&config);
        assert_eq!(settings.endpoint, config.base_url);
        assert_eq!(settings.timeout, Duration::from_secs(360));
    }
}
