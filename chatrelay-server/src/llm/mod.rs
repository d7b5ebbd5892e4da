// Copyright 2025 Sushanth (https://github.com/sushanthpy)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

use chatrelay_core::{build_request, extract, ApiReply, ChatTurn, GenerationConfig, HistoryStore};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, warn};

mod gemini;
pub use gemini::GeminiClient;

/// Number of recent turns replayed as context on each request.
pub const HISTORY_WINDOW_TURNS: usize = 10;

/// Outbound seam to the generative-language API.
#[async_trait::async_trait]
pub trait GenerateTransport: Send + Sync {
    /// Send one generation request and return the raw response body.
    /// Transport-level failures (DNS, connect, timeout) surface as errors;
    /// API-level error payloads come back as a body like any other.
    async fn generate(&self, model: &str, body: &serde_json::Value) -> anyhow::Result<String>;
}

/// Per-turn orchestration over the shared history, config, and transport.
pub struct ChatEngine {
    history: Arc<HistoryStore>,
    config: Arc<RwLock<GenerationConfig>>,
    transport: Arc<dyn GenerateTransport>,
}

impl ChatEngine {
    pub fn new(
        history: Arc<HistoryStore>,
        config: Arc<RwLock<GenerationConfig>>,
        transport: Arc<dyn GenerateTransport>,
    ) -> Self {
        Self {
            history,
            config,
            transport,
        }
    }

    /// Run one chat exchange: replay recent history, record the user turn,
    /// call the upstream API once, and record the assistant turn on success.
    ///
    /// The history is read before the new turn is appended, so a message
    /// never sees itself as context. An error reply leaves the user turn
    /// in place but records no assistant turn.
    pub async fn handle_turn(&self, user_input: &str) -> ApiReply {
        let history_text = self.history.render_recent(HISTORY_WINDOW_TURNS);
        self.history.append(ChatTurn::user(user_input));

        // Snapshot under the read lock; the guard must not live across the
        // network call.
        let (model, body) = {
            let config = self.config.read();
            (
                config.model().to_string(),
                build_request(user_input, &history_text, &config),
            )
        };

        debug!(model = %model, turns = self.history.len(), "dispatching generation request");

        let raw_body = match self.transport.generate(&model, &body).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("upstream request failed: {e:#}");
                return ApiReply::Error(e.to_string());
            }
        };

        debug!(bytes = raw_body.len(), "raw API response: {raw_body}");

        match extract(&raw_body) {
            ApiReply::Text(text) => {
                self.history.append(ChatTurn::assistant(text.clone()));
                ApiReply::Text(text)
            }
            ApiReply::Error(detail) => {
                warn!("upstream returned an error envelope");
                ApiReply::Error(detail)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use serde_json::Value;

    /// Transport that records every request body and replies with a fixed
    /// success envelope whose text echoes the call number.
    struct EchoTransport {
        requests: Mutex<Vec<Value>>,
    }

    impl EchoTransport {
        fn new() -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl GenerateTransport for EchoTransport {
        async fn generate(&self, _model: &str, body: &Value) -> anyhow::Result<String> {
            let mut requests = self.requests.lock();
            requests.push(body.clone());
            let n = requests.len();
            Ok(serde_json::json!({
                "candidates": [{ "content": { "parts": [{ "text": format!("reply {n}") }] } }]
            })
            .to_string())
        }
    }

    struct FailingTransport;

    #[async_trait::async_trait]
    impl GenerateTransport for FailingTransport {
        async fn generate(&self, _model: &str, _body: &Value) -> anyhow::Result<String> {
            anyhow::bail!("connection refused")
        }
    }

    struct ErrorEnvelopeTransport;

    #[async_trait::async_trait]
    impl GenerateTransport for ErrorEnvelopeTransport {
        async fn generate(&self, _model: &str, _body: &Value) -> anyhow::Result<String> {
            Ok(r#"{"error":"quota exceeded"}"#.to_string())
        }
    }

    fn engine_with(transport: Arc<dyn GenerateTransport>) -> (ChatEngine, Arc<HistoryStore>) {
        let history = Arc::new(HistoryStore::new());
        let config = Arc::new(RwLock::new(GenerationConfig::default()));
        let engine = ChatEngine::new(history.clone(), config, transport);
        (engine, history)
    }

    #[tokio::test]
    async fn test_success_records_both_turns() {
        let (engine, history) = engine_with(Arc::new(EchoTransport::new()));

        let reply = engine.handle_turn("Hi").await;
        assert_eq!(reply, ApiReply::Text("reply 1".to_string()));
        assert_eq!(history.len(), 2);
        assert_eq!(history.render_recent(10), "User: Hi\nAssistant: reply 1");
    }

    #[tokio::test]
    async fn test_second_turn_sees_first_exchange() {
        let transport = Arc::new(EchoTransport::new());
        let (engine, _history) = engine_with(transport.clone());

        engine.handle_turn("A").await;
        engine.handle_turn("B").await;

        let requests = transport.requests.lock();
        assert_eq!(requests.len(), 2);

        // First call saw empty history.
        assert_eq!(
            requests[0]["contents"][0]["parts"][0]["text"],
            "Previous conversation:\n\nUser: A"
        );

        // Second call saw A's exchange, in order, before its own input.
        assert_eq!(
            requests[1]["contents"][0]["parts"][0]["text"],
            "Previous conversation:\nUser: A\nAssistant: reply 1\nUser: B"
        );
    }

    #[tokio::test]
    async fn test_transport_failure_keeps_user_turn_only() {
        let (engine, history) = engine_with(Arc::new(FailingTransport));

        let reply = engine.handle_turn("Hi").await;
        match reply {
            ApiReply::Error(detail) => assert!(detail.contains("connection refused")),
            other => panic!("expected error, got {other:?}"),
        }
        assert_eq!(history.len(), 1);
        assert_eq!(history.render_recent(10), "User: Hi");
    }

    #[tokio::test]
    async fn test_error_envelope_keeps_user_turn_only() {
        let (engine, history) = engine_with(Arc::new(ErrorEnvelopeTransport));

        let reply = engine.handle_turn("Hi").await;
        match reply {
            ApiReply::Error(detail) => assert!(detail.contains("quota exceeded")),
            other => panic!("expected error, got {other:?}"),
        }
        assert_eq!(history.len(), 1);
    }

    #[tokio::test]
    async fn test_window_caps_replayed_turns() {
        let transport = Arc::new(EchoTransport::new());
        let (engine, _history) = engine_with(transport.clone());

        for i in 0..8 {
            engine.handle_turn(&format!("msg {i}")).await;
        }

        // 8 exchanges = 14 prior turns at the last call; only 10 replayed.
        let requests = transport.requests.lock();
        let last = requests[7]["contents"][0]["parts"][0]["text"]
            .as_str()
            .unwrap();
        assert!(last.starts_with("Previous conversation:\nUser: msg 2\n"));
        assert!(last.ends_with("\nUser: msg 7"));
    }
}
