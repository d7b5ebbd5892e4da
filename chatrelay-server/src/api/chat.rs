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

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Missing field is treated as an empty message.
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// POST /chat - run one chat exchange
///
/// Always answers 200; transport and API failures ride in the body as the
/// response text.
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let reply = state.engine.handle_turn(&req.message).await;
    Json(ChatResponse {
        response: reply.into_detail(),
    })
}

/// POST /clear - discard the conversation history
pub async fn clear_history(State(state): State<AppState>) -> Json<StatusResponse> {
    state.history.clear();
    info!("chat history cleared");
    Json(StatusResponse { status: "cleared" })
}
