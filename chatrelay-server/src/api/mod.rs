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

use crate::llm::ChatEngine;
use chatrelay_core::{GenerationConfig, HistoryStore};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;

pub mod chat;
pub mod config;
pub mod health;

pub use chat::{chat, clear_history};
pub use config::{get_config, update_config};
pub use health::health_check;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub history: Arc<HistoryStore>,
    pub config: Arc<RwLock<GenerationConfig>>,
    pub engine: Arc<ChatEngine>,
}

/// Body for the status-only endpoints (`/health`, `/clear`, `POST /config`).
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}
