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

//! Runtime generation parameters.
//!
//! Every setter clamps out-of-range input into the valid interval instead
//! of rejecting it, so callers always get an ok response from `/config`.

/// Maximum stored length of a model name, in bytes.
pub const MODEL_NAME_MAX: usize = 127;

/// Upper bound the remote API accepts for `maxOutputTokens`.
pub const MAX_OUTPUT_TOKENS_CAP: u32 = 307_200;

/// Sampling parameters and prompt configuration for the remote model.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    model: String,
    temperature: f64,
    top_p: f64,
    top_k: u32,
    max_output_tokens: u32,
    system_prompt: Option<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: "gemini-1.5-pro".to_string(),
            temperature: 0.7,
            top_p: 1.0,
            top_k: 64,
            max_output_tokens: 2048,
            system_prompt: None,
        }
    }
}

impl GenerationConfig {
    /// Replace the model name. Empty input leaves the previous value
    /// unchanged; anything longer than [`MODEL_NAME_MAX`] is silently
    /// truncated on a UTF-8 boundary.
    pub fn set_model(&mut self, name: &str) {
        if name.is_empty() {
            return;
        }
        let mut end = name.len().min(MODEL_NAME_MAX);
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        self.model = name[..end].to_string();
    }

    /// Store sampling parameters, clamping each field independently to its
    /// valid interval. Never fails.
    pub fn set_generation_params(
        &mut self,
        temperature: f64,
        top_p: f64,
        top_k: i64,
        max_output_tokens: i64,
    ) {
        self.temperature = temperature.clamp(0.0, 2.0);
        self.top_p = top_p.clamp(0.0, 1.0);
        self.top_k = top_k.clamp(1, i64::from(u32::MAX)) as u32;
        self.max_output_tokens =
            max_output_tokens.clamp(1, i64::from(MAX_OUTPUT_TOKENS_CAP)) as u32;
    }

    /// Store a system prompt. An empty string is equivalent to clearing.
    pub fn set_system_prompt(&mut self, text: &str) {
        if text.is_empty() {
            self.system_prompt = None;
        } else {
            self.system_prompt = Some(text.to_string());
        }
    }

    /// Remove the system prompt.
    pub fn clear_system_prompt(&mut self) {
        self.system_prompt = None;
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn top_p(&self) -> f64 {
        self.top_p
    }

    pub fn top_k(&self) -> u32 {
        self.top_k
    }

    pub fn max_output_tokens(&self) -> u32 {
        self.max_output_tokens
    }

    /// Current system prompt, or `""` when unset.
    pub fn system_prompt(&self) -> &str {
        self.system_prompt.as_deref().unwrap_or("")
    }
}
