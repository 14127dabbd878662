pub mod board;
pub mod chat;
pub mod lead;
pub mod stage;

pub use board::{BoardState, DragOutcome, DropTarget, MoveIntent};
pub use chat::{ChatMessage, MessageDirection, MAX_DISPLAY_CONTENT_CHARS, SYSTEM_MARKER};
pub use lead::{Lead, LeadId, LeadSource};
pub use stage::PipelineStage;
