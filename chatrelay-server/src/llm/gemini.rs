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

use super::GenerateTransport;
use crate::config::LlmConfig;
use std::time::Duration;
use tracing::warn;

/// HTTP client for the Gemini `:generateContent` endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: &LlmConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        let api_key = config.api_key.clone().unwrap_or_default();
        if api_key.is_empty() {
            warn!("GEMINI_API_KEY not set; upstream requests will be rejected");
        }

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

#[async_trait::async_trait]
impl GenerateTransport for GeminiClient {
    async fn generate(&self, model: &str, body: &serde_json::Value) -> anyhow::Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );

        // The status line is not inspected: API-level errors ride in the
        // body and are handled by the extractor.
        let response = self.http.post(&url).json(body).send().await?;
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_stripped_from_base_url() {
        let client = GeminiClient::new(&LlmConfig {
            api_key: Some("k".to_string()),
            api_base_url: "http://localhost:9999/".to_string(),
            request_timeout_secs: 1,
        })
        .unwrap();
        assert_eq!(client.base_url, "http://localhost:9999");
    }

    #[test]
    fn test_missing_key_becomes_empty_credential() {
        let client = GeminiClient::new(&LlmConfig::default()).unwrap();
        assert_eq!(client.api_key, "");
    }
}
