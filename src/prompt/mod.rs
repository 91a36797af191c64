//! Prompt assembly
//!
//! Renders the role instruction and conversation history into the single
//! text block submitted to the model. Pure string work — no truncation, no
//! token accounting, content passed through verbatim.

use crate::session::{Message, MessageRole};

/// Speaker label for user messages in the rendered transcript
pub const USER_LABEL: &str = "User";

/// Speaker label for assistant messages in the rendered transcript
pub const AI_LABEL: &str = "AI";

/// Trailing cue telling the model to continue as the assistant
pub const ASSISTANT_CUE: &str = "\nAI:";

fn speaker_label(role: MessageRole) -> &'static str {
    match role {
        MessageRole::User => USER_LABEL,
        MessageRole::Assistant => AI_LABEL,
    }
}

/// Build the full prompt for one generation call.
///
/// Layout: persona preamble, then (when history is non-empty) a labeled
/// transcript in chronological order, then the assistant cue. Same inputs
/// always produce byte-identical output.
pub fn build_prompt(role: &str, history: &[Message]) -> String {
    let mut prompt = String::new();

    // 1. Persona preamble, role text verbatim
    prompt.push_str(&format!(
        "You are acting in the following role: {}.\n\n",
        role
    ));

    // 2. Transcript section, only when there is history to show
    if !history.is_empty() {
        prompt.push_str("Conversation so far:\n");
        for msg in history {
            prompt.push_str(&format!("{}: {}\n", speaker_label(msg.role), msg.content));
        }
    }

    // 3. Continuation cue
    prompt.push_str(ASSISTANT_CUE);

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history_has_no_transcript() {
        let prompt = build_prompt("R", &[]);
        assert!(prompt.starts_with("You are acting in the following role: R.\n\n"));
        assert!(!prompt.contains("Conversation so far:"));
        assert!(prompt.ends_with(ASSISTANT_CUE));
    }

    #[test]
    fn test_transcript_lines_labeled_and_ordered() {
        let history = vec![Message::user("hi"), Message::assistant("hello")];
        let prompt = build_prompt("R", &history);

        let user_line = prompt.find("User: hi\n").expect("user line missing");
        let ai_line = prompt.find("AI: hello\n").expect("assistant line missing");
        assert!(user_line < ai_line, "transcript out of order");

        let cue = prompt.rfind(ASSISTANT_CUE).unwrap();
        assert!(ai_line < cue, "transcript must precede the cue");
    }

    #[test]
    fn test_role_text_verbatim() {
        let prompt = build_prompt("a <weird> role: with punctuation!", &[]);
        assert!(prompt.contains("a <weird> role: with punctuation!"));
    }

    #[test]
    fn test_build_prompt_is_pure() {
        let history = vec![
            Message::user("first"),
            Message::assistant("second"),
            Message::user("third"),
        ];
        let a = build_prompt("travel expert", &history);
        let b = build_prompt("travel expert", &history);
        assert_eq!(a, b);
    }
}
