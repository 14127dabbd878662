use crate::cli::BoardAction;
use crate::context::CliContext;
use crate::output;
use impera_domain::{BoardState, DropTarget, PipelineStage};
use impera_pipeline::{BoardSession, TracingNotifier};
use impera_store::EntityStore;
use std::sync::Arc;

pub async fn handle(ctx: &mut CliContext, action: BoardAction) -> anyhow::Result<()> {
    match action {
        BoardAction::List => {
            let leads = ctx.store.get_leads().await?;
            let board = BoardState::new(leads);
            let columns: Vec<_> = PipelineStage::ALL
                .iter()
                .map(|stage| {
                    serde_json::json!({
                        "stage": stage.label(),
                        "leads": board.column(*stage),
                    })
                })
                .collect();
            output::output_list(columns);
        }
        BoardAction::Move { id, stage } => {
            let leads = ctx.store.get_leads().await?;
            if !leads.iter().any(|l| l.id == id) {
                output::output_error(&format!("Lead not found: {}", id));
            }

            let notifier = Arc::new(TracingNotifier::new(ctx.config.celebrations));
            let store: Arc<dyn EntityStore> = ctx.store.clone();
            let mut session = BoardSession::new(leads, store, notifier);

            session.begin_drag(id);
            let outcome = session.end_drag(id, Some(DropTarget::Column(stage)));
            session.settle().await;

            let lead = ctx
                .store
                .get_lead(id)
                .await?
                .ok_or_else(|| anyhow::anyhow!("Lead disappeared during move: {}", id))?;
            if lead.stage != stage {
                output::output_error(&format!("Falha ao mover o lead {}", id));
            }

            ctx.save().await?;
            output::output_success(serde_json::json!({
                "lead": lead,
                "won": outcome.won,
            }));
        }
    }
    Ok(())
}
