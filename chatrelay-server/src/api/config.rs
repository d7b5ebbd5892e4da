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

use crate::api::{AppState, StatusResponse};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub model: String,
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
    pub max_output_tokens: u32,
    /// Empty string when no system prompt is set.
    pub system_prompt: String,
}

/// Partial update: unspecified fields retain their current values.
#[derive(Debug, Deserialize)]
pub struct ConfigUpdate {
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    pub top_k: Option<i64>,
    pub max_output_tokens: Option<i64>,
    pub system_prompt: Option<String>,
}

/// GET /config - current generation parameters
pub async fn get_config(State(state): State<AppState>) -> Json<ConfigResponse> {
    let config = state.config.read();
    Json(ConfigResponse {
        model: config.model().to_string(),
        temperature: config.temperature(),
        top_p: config.top_p(),
        top_k: config.top_k(),
        max_output_tokens: config.max_output_tokens(),
        system_prompt: config.system_prompt().to_string(),
    })
}

/// POST /config - apply a partial update through the clamping setters
///
/// Out-of-range values are clamped, never rejected; the endpoint always
/// answers ok.
pub async fn update_config(
    State(state): State<AppState>,
    Json(update): Json<ConfigUpdate>,
) -> Json<StatusResponse> {
    let mut config = state.config.write();

    if let Some(model) = &update.model {
        config.set_model(model);
    }

    if update.temperature.is_some()
        || update.top_p.is_some()
        || update.top_k.is_some()
        || update.max_output_tokens.is_some()
    {
        let temperature = update.temperature.unwrap_or_else(|| config.temperature());
        let top_p = update.top_p.unwrap_or_else(|| config.top_p());
        let top_k = update.top_k.unwrap_or_else(|| i64::from(config.top_k()));
        let max_output_tokens = update
            .max_output_tokens
            .unwrap_or_else(|| i64::from(config.max_output_tokens()));
        config.set_generation_params(temperature, top_p, top_k, max_output_tokens);
    }

    if let Some(prompt) = &update.system_prompt {
        if prompt.is_empty() {
            config.clear_system_prompt();
        } else {
            config.set_system_prompt(prompt);
        }
    }

    info!(model = %config.model(), "generation config updated");
    Json(StatusResponse { status: "ok" })
}
