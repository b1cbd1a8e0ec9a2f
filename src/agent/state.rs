//! Conversation state threaded through the dialogue loop.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::intent::Intent;
use crate::leads::LeadRecord;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Agent,
}

/// One history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub content: String,
    pub at: DateTime<Utc>,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            content: content.into(),
            at: Utc::now(),
        }
    }

    pub fn agent(content: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Agent,
            content: content.into(),
            at: Utc::now(),
        }
    }
}

/// Conversation state. Created once per conversation by the caller and
/// threaded through every turn; the dialogue loop returns a successor state
/// and never mutates its input. Not persisted here — storage across process
/// restarts is the caller's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationState {
    pub conversation_id: Uuid,
    /// Full transcript, append-only.
    pub history: Vec<Turn>,
    /// Intent resolved for the most recently processed turn.
    pub intent: Option<Intent>,
    /// Lead data accumulated so far. Reset only by starting a new
    /// conversation; no branch ever clears it.
    pub lead: LeadRecord,
    /// Number of user turns processed.
    pub turn_count: u32,
}

impl ConversationState {
    /// Fresh state for a new conversation.
    pub fn new() -> Self {
        Self {
            conversation_id: Uuid::new_v4(),
            history: Vec::new(),
            intent: None,
            lead: LeadRecord::default(),
            turn_count: 0,
        }
    }

    /// Render the last `window` turns, oldest first, as classifier context.
    pub fn history_window(&self, window: usize) -> String {
        let skip = self.history.len().saturating_sub(window);
        self.history[skip..]
            .iter()
            .map(|turn| {
                let label = match turn.speaker {
                    Speaker::User => "User",
                    Speaker::Agent => "Agent",
                };
                format!("{label}: {}", turn.content)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_empty() {
        let state = ConversationState::new();
        assert!(state.history.is_empty());
        assert_eq!(state.intent, None);
        assert!(state.lead.is_empty());
        assert_eq!(state.turn_count, 0);
    }

    #[test]
    fn history_window_renders_labels_oldest_first() {
        let mut state = ConversationState::new();
        state.history.push(Turn::user("hello"));
        state.history.push(Turn::agent("hi there"));
        assert_eq!(state.history_window(6), "User: hello\nAgent: hi there");
    }

    #[test]
    fn history_window_is_bounded() {
        let mut state = ConversationState::new();
        for i in 0..10 {
            state.history.push(Turn::user(format!("msg {i}")));
        }
        let window = state.history_window(6);
        assert_eq!(window.lines().count(), 6);
        assert!(window.starts_with("User: msg 4"));
        assert!(window.ends_with("User: msg 9"));
    }

    #[test]
    fn history_window_of_empty_history_is_empty() {
        assert_eq!(ConversationState::new().history_window(6), "");
    }

    #[test]
    fn serde_round_trip() {
        let mut state = ConversationState::new();
        state.history.push(Turn::user("hello"));
        state.intent = Some(Intent::Greeting);
        state.turn_count = 1;

        let json = serde_json::to_string(&state).unwrap();
        let parsed: ConversationState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state);
    }
}
