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

//! Assembly of the `:generateContent` request body.

use crate::config::GenerationConfig;
use serde_json::{json, Value};

/// Build the JSON body for a generation request.
///
/// The body carries, in order: an optional leading content block with the
/// configured system prompt, then exactly one combined block holding the
/// rendered history and the current input. `history_text` must already be
/// capped by the caller; no further trimming happens here.
pub fn build_request(user_input: &str, history_text: &str, config: &GenerationConfig) -> Value {
    let mut contents = Vec::new();

    let system_prompt = config.system_prompt();
    if !system_prompt.is_empty() {
        contents.push(json!({
            "role": "user",
            "parts": [{ "text": system_prompt }],
        }));
    }

    let combined = format!("Previous conversation:\n{history_text}\nUser: {user_input}");
    contents.push(json!({
        "parts": [{ "text": combined }],
    }));

    json!({
        "contents": contents,
        "generationConfig": {
            "temperature": config.temperature(),
            "topP": config.top_p(),
            "topK": config.top_k(),
            "maxOutputTokens": config.max_output_tokens(),
        },
    })
}
