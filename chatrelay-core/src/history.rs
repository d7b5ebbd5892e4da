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

//! Append-only conversation history with a bounded rendered view.
//!
//! The store keeps every turn in memory; only the rendered transcript fed
//! to the remote API is capped. Truncation drops from the front so the most
//! recent exchange always survives.

use crate::turn::ChatTurn;
use parking_lot::RwLock;

/// Character budget for the rendered transcript.
pub const MAX_RENDERED_CHARS: usize = 40_000;

/// Shared, append-only sequence of conversation turns.
///
/// All access goes through an internal lock so concurrent handlers never
/// observe a half-appended turn or a partially cleared list.
#[derive(Debug, Default)]
pub struct HistoryStore {
    turns: RwLock<Vec<ChatTurn>>,
}

impl HistoryStore {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn to the end of the history.
    pub fn append(&self, turn: ChatTurn) {
        self.turns.write().push(turn);
    }

    /// Number of turns currently stored.
    pub fn len(&self) -> usize {
        self.turns.read().len()
    }

    /// Check if the history is empty.
    pub fn is_empty(&self) -> bool {
        self.turns.read().is_empty()
    }

    /// Render the last `max_turns` turns as a newline-joined transcript,
    /// oldest of the window first, one `<Role>: <text>` line per turn.
    ///
    /// The result is capped at [`MAX_RENDERED_CHARS`]: when the window
    /// renders longer, the front is dropped (aligned forward to a UTF-8
    /// boundary) so the suffix survives byte-for-byte.
    pub fn render_recent(&self, max_turns: usize) -> String {
        let turns = self.turns.read();
        let start = turns.len().saturating_sub(max_turns);

        let mut out = String::new();
        for turn in &turns[start..] {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(turn.role.label());
            out.push_str(": ");
            out.push_str(&turn.text);
        }
        drop(turns);

        if out.len() > MAX_RENDERED_CHARS {
            let mut cut = out.len() - MAX_RENDERED_CHARS;
            while !out.is_char_boundary(cut) {
                cut += 1;
            }
            tracing::debug!(
                dropped = cut,
                "rendered history exceeded budget, truncating from the front"
            );
            out = out.split_off(cut);
        }

        out
    }

    /// Discard all turns, as if replacing the store with a fresh one.
    ///
    /// The swap happens under the write lock, so a concurrent render sees
    /// either the full old list or the empty new one, never a partial state.
    pub fn clear(&self) {
        *self.turns.write() = Vec::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_append_and_render() {
        let store = HistoryStore::new();
        store.append(ChatTurn::user("Hello"));
        store.append(ChatTurn::assistant("Hi! How can I help?"));

        assert_eq!(store.len(), 2);
        assert_eq!(
            store.render_recent(10),
            "User: Hello\nAssistant: Hi! How can I help?"
        );
    }

    #[test]
    fn test_render_empty_window() {
        let store = HistoryStore::new();
        store.append(ChatTurn::user("Hello"));
        assert_eq!(store.render_recent(0), "");
    }

    #[test]
    fn test_render_window_smaller_than_history() {
        let store = HistoryStore::new();
        for i in 0..5 {
            store.append(ChatTurn::user(format!("msg {i}")));
        }
        let rendered = store.render_recent(2);
        assert_eq!(rendered, "User: msg 3\nUser: msg 4");
    }

    #[test]
    fn test_truncation_preserves_suffix() {
        let store = HistoryStore::new();
        store.append(ChatTurn::user("a".repeat(50_000)));
        store.append(ChatTurn::assistant("the end"));

        let rendered = store.render_recent(10);
        assert_eq!(rendered.len(), MAX_RENDERED_CHARS);
        assert!(rendered.ends_with("\nAssistant: the end"));
    }

    #[test]
    fn test_truncation_respects_utf8_boundaries() {
        let store = HistoryStore::new();
        store.append(ChatTurn::user("é".repeat(30_000)));
        assert!(store.render_recent(1).len() <= MAX_RENDERED_CHARS);
    }

    #[test]
    fn test_clear() {
        let store = HistoryStore::new();
        store.append(ChatTurn::user("Hello"));
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.render_recent(10), "");
    }

    proptest! {
        #[test]
        fn render_matches_last_n_turns(
            texts in proptest::collection::vec("[a-z ]{0,20}", 0..30),
            n in 0usize..40,
        ) {
            let store = HistoryStore::new();
            for t in &texts {
                store.append(ChatTurn::user(t.clone()));
            }

            let window = texts.len().min(n);
            let expected: Vec<String> = texts[texts.len() - window..]
                .iter()
                .map(|t| format!("User: {t}"))
                .collect();
            prop_assert_eq!(store.render_recent(n), expected.join("\n"));
        }
    }
}
