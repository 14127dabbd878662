use crate::cli::ChatAction;
use crate::context::CliContext;
use crate::output;
use impera_pipeline::{ChatSession, TracingNotifier};
use impera_store::EntityStore;
use std::sync::Arc;

pub async fn handle(ctx: &mut CliContext, action: ChatAction) -> anyhow::Result<()> {
    let notifier = Arc::new(TracingNotifier::default());
    let store: Arc<dyn EntityStore> = ctx.store.clone();

    match action {
        ChatAction::History { phone } => {
            let session = ChatSession::open(store, notifier, phone).await?;
            let messages: Vec<_> = session
                .transcript()
                .iter()
                .map(|entry| entry.message.clone())
                .collect();
            output::output_list(messages);
        }
        ChatAction::Send { phone, message } => {
            let mut session = ChatSession::open(store, notifier, phone).await?;
            match session.send(message).await {
                Ok(stored) => {
                    ctx.save().await?;
                    output::output_success(&stored);
                }
                Err(e) => output::output_error(&format!("Falha ao enviar mensagem: {}", e)),
            }
        }
    }
    Ok(())
}
