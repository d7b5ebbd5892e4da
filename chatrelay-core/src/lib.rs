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

//! Chatrelay Core
//!
//! Domain logic for the chat proxy: conversation turns, the bounded
//! history store, generation parameters, request-body assembly, and
//! response-envelope extraction. Everything here is synchronous and free
//! of I/O; the server crate supplies transport and orchestration.

pub mod config;
pub mod extract;
pub mod history;
pub mod request;
pub mod turn;

pub use config::{GenerationConfig, MAX_OUTPUT_TOKENS_CAP, MODEL_NAME_MAX};
pub use extract::{extract, ApiReply};
pub use history::{HistoryStore, MAX_RENDERED_CHARS};
pub use request::build_request;
pub use turn::{ChatRole, ChatTurn};
