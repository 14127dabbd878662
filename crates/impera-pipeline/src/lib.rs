pub mod chat;
pub mod notify;
pub mod persister;
pub mod session;

pub use chat::{ChatSession, TranscriptEntry};
pub use notify::{Notifier, ToastLevel, TracingNotifier};
pub use persister::{MoveCommand, MoveResult};
pub use session::BoardSession;
