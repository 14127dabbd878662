use async_trait::async_trait;
use impera_core::ImperaResult;
use impera_domain::{ChatMessage, Lead, LeadId, MessageDirection, PipelineStage};
use tokio::sync::broadcast;

/// A message about to be persisted. The store assigns the id and timestamp;
/// callers correlate the returned record with their optimistic entry.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub conversation: String,
    pub direction: MessageDirection,
    pub content: String,
}

/// The hosted backend, seen from the client components.
///
/// Tenant scoping, auth, and the realtime transport all live behind this
/// trait; the board and chat components only ever receive it injected, so
/// tests can substitute a fake or a mock.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// All leads visible to the caller, most recent contact first. This is
    /// the board's load order.
    async fn get_leads(&self) -> ImperaResult<Vec<Lead>>;

    async fn get_lead(&self, id: LeadId) -> ImperaResult<Option<Lead>>;

    /// Single-field stage update. Last writer wins; there is no version
    /// check and no retry.
    async fn update_lead_status(&self, id: LeadId, stage: PipelineStage) -> ImperaResult<Lead>;

    /// Full history for one conversation, oldest first. Unfiltered: what to
    /// display is the client's concern.
    async fn get_messages(&self, conversation: &str) -> ImperaResult<Vec<ChatMessage>>;

    /// Live feed of inserts for one conversation key. The receiver must be
    /// dropped (or its task aborted) when the conversation selection
    /// changes.
    fn subscribe_messages(&self, conversation: &str) -> broadcast::Receiver<ChatMessage>;

    /// Persist an outbound message and return the stored record. The insert
    /// is also delivered on the conversation's feed.
    async fn send_message(&self, message: NewMessage) -> ImperaResult<ChatMessage>;
}
