use crate::snapshot::DataSnapshot;
use crate::traits::{EntityStore, NewMessage};
use async_trait::async_trait;
use chrono::Utc;
use impera_core::{ImperaError, ImperaResult};
use impera_domain::{ChatMessage, Lead, LeadId, PipelineStage};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tokio::sync::broadcast;
use uuid::Uuid;

const FEED_CAPACITY: usize = 64;

/// In-memory Entity Store. The reference implementation behind the
/// `EntityStore` trait: backs the CLI (seeded from a `DataSnapshot`) and
/// the component tests, including their failure paths via one-shot fault
/// injection.
pub struct MemoryStore {
    inner: Mutex<Inner>,
    feeds: Mutex<HashMap<String, broadcast::Sender<ChatMessage>>>,
    fail_update: AtomicBool,
    fail_send: AtomicBool,
}

struct Inner {
    leads: Vec<Lead>,
    messages: Vec<ChatMessage>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::from_snapshot(DataSnapshot::default())
    }

    pub fn from_snapshot(snapshot: DataSnapshot) -> Self {
        Self {
            inner: Mutex::new(Inner {
                leads: snapshot.leads,
                messages: snapshot.messages,
            }),
            feeds: Mutex::new(HashMap::new()),
            fail_update: AtomicBool::new(false),
            fail_send: AtomicBool::new(false),
        }
    }

    pub fn snapshot(&self) -> DataSnapshot {
        let inner = self.inner.lock().unwrap();
        DataSnapshot {
            leads: inner.leads.clone(),
            messages: inner.messages.clone(),
        }
    }

    /// Make the next `update_lead_status` call fail with a store error.
    pub fn fail_next_update(&self) {
        self.fail_update.store(true, Ordering::SeqCst);
    }

    /// Make the next `send_message` call fail with a store error.
    pub fn fail_next_send(&self) {
        self.fail_send.store(true, Ordering::SeqCst);
    }

    fn feed_sender(&self, conversation: &str) -> broadcast::Sender<ChatMessage> {
        let mut feeds = self.feeds.lock().unwrap();
        feeds
            .entry(conversation.to_string())
            .or_insert_with(|| broadcast::channel(FEED_CAPACITY).0)
            .clone()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn get_leads(&self) -> ImperaResult<Vec<Lead>> {
        let inner = self.inner.lock().unwrap();
        let mut leads = inner.leads.clone();
        leads.sort_by(|a, b| b.last_contact_at.cmp(&a.last_contact_at));
        Ok(leads)
    }

    async fn get_lead(&self, id: LeadId) -> ImperaResult<Option<Lead>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.leads.iter().find(|l| l.id == id).cloned())
    }

    async fn update_lead_status(&self, id: LeadId, stage: PipelineStage) -> ImperaResult<Lead> {
        if self.fail_update.swap(false, Ordering::SeqCst) {
            return Err(ImperaError::Store("injected update failure".to_string()));
        }
        let mut inner = self.inner.lock().unwrap();
        let lead = inner
            .leads
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| ImperaError::NotFound(format!("Lead {}", id)))?;
        lead.set_stage(stage);
        tracing::debug!(lead = %id, stage = %stage, "updated lead status");
        Ok(lead.clone())
    }

    async fn get_messages(&self, conversation: &str) -> ImperaResult<Vec<ChatMessage>> {
        let inner = self.inner.lock().unwrap();
        let mut messages: Vec<_> = inner
            .messages
            .iter()
            .filter(|m| m.conversation == conversation)
            .cloned()
            .collect();
        messages.sort_by(|a, b| a.sent_at.cmp(&b.sent_at));
        Ok(messages)
    }

    fn subscribe_messages(&self, conversation: &str) -> broadcast::Receiver<ChatMessage> {
        self.feed_sender(conversation).subscribe()
    }

    async fn send_message(&self, message: NewMessage) -> ImperaResult<ChatMessage> {
        if self.fail_send.swap(false, Ordering::SeqCst) {
            return Err(ImperaError::Store("injected send failure".to_string()));
        }
        let stored = ChatMessage {
            id: Uuid::new_v4(),
            conversation: message.conversation,
            direction: message.direction,
            content: message.content,
            sent_at: Utc::now(),
        };
        {
            let mut inner = self.inner.lock().unwrap();
            inner.messages.push(stored.clone());
        }
        // Nobody listening is fine
        let _ = self.feed_sender(&stored.conversation).send(stored.clone());
        tracing::debug!(conversation = %stored.conversation, "stored chat message");
        Ok(stored)
    }
}
