//! Session state store
//!
//! One session per process: the active role instruction plus the ordered
//! conversation history. Changing the role wipes the history — a transcript
//! recorded under one persona must never leak into the next.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Assistant,
}

/// A single exchanged message. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Errors from session mutations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("role instruction must not be empty")]
    EmptyRole,
}

/// The process-wide chat session: role instruction + append-only history.
///
/// History is append-only for the lifetime of a role; the only bulk
/// mutation is the full clear performed by `set_role`. Messages are never
/// reordered or deleted individually.
#[derive(Debug, Default)]
pub struct Session {
    role_instruction: String,
    history: Vec<Message>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the role instruction and clear the history.
    ///
    /// Rejects empty or whitespace-only input without touching any state.
    /// The stored value is the trimmed instruction.
    pub fn set_role(&mut self, role: &str) -> Result<(), SessionError> {
        let trimmed = role.trim();
        if trimmed.is_empty() {
            return Err(SessionError::EmptyRole);
        }
        self.role_instruction = trimmed.to_string();
        self.history.clear();
        Ok(())
    }

    /// Append a message to the history. Unbounded; never fails.
    pub fn append_message(&mut self, message: Message) {
        self.history.push(message);
    }

    pub fn role(&self) -> &str {
        &self.role_instruction
    }

    /// Whether a role instruction has been set yet.
    pub fn has_role(&self) -> bool {
        !self.role_instruction.is_empty()
    }

    /// Read-only view of the history, chronological order.
    pub fn history(&self) -> &[Message] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_unset() {
        let session = Session::new();
        assert!(!session.has_role());
        assert_eq!(session.role(), "");
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_set_role_trims_and_stores() {
        let mut session = Session::new();
        session.set_role("  travel expert  ").unwrap();
        assert!(session.has_role());
        assert_eq!(session.role(), "travel expert");
    }

    #[test]
    fn test_empty_role_rejected_state_untouched() {
        let mut session = Session::new();
        session.set_role("teacher").unwrap();
        session.append_message(Message::user("hi"));

        for bad in ["", "   ", "\n\t"] {
            let err = session.set_role(bad).unwrap_err();
            assert_eq!(err, SessionError::EmptyRole);
            // Prior role and history survive the rejected submit
            assert_eq!(session.role(), "teacher");
            assert_eq!(session.history().len(), 1);
        }
    }

    #[test]
    fn test_role_change_clears_history() {
        let mut session = Session::new();
        session.set_role("chef").unwrap();
        session.append_message(Message::user("got a recipe?"));
        session.append_message(Message::assistant("sure, here is one"));
        assert_eq!(session.history().len(), 2);

        session.set_role("travel expert").unwrap();
        assert!(session.history().is_empty());
        assert_eq!(session.role(), "travel expert");
    }

    #[test]
    fn test_append_preserves_order() {
        let mut session = Session::new();
        session.set_role("echo").unwrap();
        for i in 0..5 {
            session.append_message(Message::user(format!("msg {i}")));
        }
        assert_eq!(session.history().len(), 5);
        for (i, msg) in session.history().iter().enumerate() {
            assert_eq!(msg.content, format!("msg {i}"));
            assert_eq!(msg.role, MessageRole::User);
        }
    }

    #[test]
    fn test_consecutive_assistant_messages_allowed() {
        let mut session = Session::new();
        session.set_role("anything").unwrap();
        session.append_message(Message::assistant("first"));
        session.append_message(Message::assistant("second"));
        assert_eq!(session.history().len(), 2);
    }
}
