use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Marker embedded in internal automation prompts. Messages carrying it are
/// store records, not conversation, and never reach a transcript.
pub const SYSTEM_MARKER: &str = "[system]";

/// Longest message body shown in a transcript, in characters. Anything
/// longer is assumed to be automation payload and is dropped from display
/// while remaining in the store.
pub const MAX_DISPLAY_CONTENT_CHARS: usize = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageDirection {
    #[serde(rename = "human")]
    Human,
    #[serde(rename = "ai")]
    Ai,
}

/// One message in a conversation. Conversations are keyed by phone number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub conversation: String,
    pub direction: MessageDirection,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Whether this message belongs in a human-facing transcript.
    pub fn is_displayable(&self) -> bool {
        !self.content.contains(SYSTEM_MARKER)
            && self.content.chars().count() <= MAX_DISPLAY_CONTENT_CHARS
    }
}
