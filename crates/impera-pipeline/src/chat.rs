use crate::notify::{Notifier, ToastLevel};
use chrono::Utc;
use impera_core::ImperaResult;
use impera_domain::{ChatMessage, MessageDirection};
use impera_store::{EntityStore, NewMessage};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use uuid::Uuid;

/// A transcript line. `pending` marks an optimistic entry still waiting for
/// the store to confirm; its message id is the client correlation id until
/// the confirmed record replaces it.
#[derive(Debug, Clone)]
pub struct TranscriptEntry {
    pub message: ChatMessage,
    pub pending: bool,
}

/// Live transcript for a single conversation key.
///
/// History is loaded once at open; afterwards the transcript grows from the
/// store's insert feed and from locally sent messages. The feed task is
/// aborted when the session drops, so switching conversations can never
/// leak messages from the previous key into the next view.
pub struct ChatSession {
    conversation: String,
    transcript: Vec<TranscriptEntry>,
    inbox: mpsc::UnboundedReceiver<ChatMessage>,
    feed_task: JoinHandle<()>,
    store: Arc<dyn EntityStore>,
    notifier: Arc<dyn Notifier>,
}

impl ChatSession {
    pub async fn open(
        store: Arc<dyn EntityStore>,
        notifier: Arc<dyn Notifier>,
        conversation: impl Into<String>,
    ) -> ImperaResult<Self> {
        let conversation = conversation.into();

        let transcript = store
            .get_messages(&conversation)
            .await?
            .into_iter()
            .filter(ChatMessage::is_displayable)
            .map(|message| TranscriptEntry {
                message,
                pending: false,
            })
            .collect();

        let feed = store.subscribe_messages(&conversation);
        let (inbox_tx, inbox) = mpsc::unbounded_channel();
        let key = conversation.clone();
        let feed_task = tokio::spawn(forward_feed(feed, inbox_tx, key));

        Ok(Self {
            conversation,
            transcript,
            inbox,
            feed_task,
            store,
            notifier,
        })
    }

    pub fn conversation(&self) -> &str {
        &self.conversation
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn is_live(&self) -> bool {
        !self.feed_task.is_finished()
    }

    /// Append feed arrivals to the transcript. A message whose id is
    /// already present is the echo of a reconciled send and is skipped.
    pub fn drain_incoming(&mut self) -> usize {
        let mut appended = 0;
        while let Ok(message) = self.inbox.try_recv() {
            if self.contains(message.id) {
                continue;
            }
            self.transcript.push(TranscriptEntry {
                message,
                pending: false,
            });
            appended += 1;
        }
        appended
    }

    /// Optimistic send: the message shows up in the transcript immediately
    /// under a client correlation id, then is replaced by the stored record
    /// on confirmation or removed on failure.
    pub async fn send(&mut self, content: impl Into<String>) -> ImperaResult<ChatMessage> {
        let content = content.into();
        let correlation = Uuid::new_v4();

        self.transcript.push(TranscriptEntry {
            message: ChatMessage {
                id: correlation,
                conversation: self.conversation.clone(),
                direction: MessageDirection::Human,
                content: content.clone(),
                sent_at: Utc::now(),
            },
            pending: true,
        });

        let sent = self
            .store
            .send_message(NewMessage {
                conversation: self.conversation.clone(),
                direction: MessageDirection::Human,
                content,
            })
            .await;

        match sent {
            Ok(stored) => {
                if let Some(entry) = self
                    .transcript
                    .iter_mut()
                    .find(|e| e.pending && e.message.id == correlation)
                {
                    entry.message = stored.clone();
                    entry.pending = false;
                }
                Ok(stored)
            }
            Err(e) => {
                self.transcript.retain(|entry| entry.message.id != correlation);
                self.notifier
                    .toast(ToastLevel::Error, &format!("Falha ao enviar mensagem: {}", e));
                Err(e)
            }
        }
    }

    fn contains(&self, id: Uuid) -> bool {
        self.transcript.iter().any(|entry| entry.message.id == id)
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        self.feed_task.abort();
    }
}

async fn forward_feed(
    mut feed: broadcast::Receiver<ChatMessage>,
    inbox: mpsc::UnboundedSender<ChatMessage>,
    conversation: String,
) {
    loop {
        match feed.recv().await {
            Ok(message) => {
                if message.conversation != conversation || !message.is_displayable() {
                    continue;
                }
                if inbox.send(message).is_err() {
                    break;
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(conversation = %conversation, skipped, "chat feed lagged");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
