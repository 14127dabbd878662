use impera_core::ImperaError;
use impera_domain::{LeadId, PipelineStage};
use impera_store::EntityStore;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// One status transition to persist. The correlation id ties the eventual
/// result back to the pending-move entry that can revert it.
#[derive(Debug, Clone, Copy)]
pub struct MoveCommand {
    pub correlation: Uuid,
    pub lead_id: LeadId,
    pub target: PipelineStage,
}

#[derive(Debug)]
pub struct MoveResult {
    pub correlation: Uuid,
    pub lead_id: LeadId,
    pub target: PipelineStage,
    pub outcome: Result<(), ImperaError>,
}

/// Spawn the persister worker. Commands are processed strictly in queue
/// order, one store call each, so two rapid moves of the same card can
/// never land at the store out of order. No retry: a failed command is
/// reported and the queue moves on.
pub fn spawn(
    store: Arc<dyn EntityStore>,
) -> (
    mpsc::UnboundedSender<MoveCommand>,
    mpsc::UnboundedReceiver<MoveResult>,
    JoinHandle<()>,
) {
    let (command_tx, mut command_rx) = mpsc::unbounded_channel::<MoveCommand>();
    let (result_tx, result_rx) = mpsc::unbounded_channel::<MoveResult>();

    let handle = tokio::spawn(async move {
        while let Some(command) = command_rx.recv().await {
            let outcome = store
                .update_lead_status(command.lead_id, command.target)
                .await
                .map(|_| ());

            match &outcome {
                Ok(()) => tracing::debug!(
                    lead = %command.lead_id,
                    stage = %command.target,
                    "persisted status transition"
                ),
                Err(e) => tracing::warn!(
                    lead = %command.lead_id,
                    stage = %command.target,
                    error = %e,
                    "status transition failed"
                ),
            }

            let result = MoveResult {
                correlation: command.correlation,
                lead_id: command.lead_id,
                target: command.target,
                outcome,
            };
            if result_tx.send(result).is_err() {
                // Session gone; nothing left to report to.
                break;
            }
        }
    });

    (command_tx, result_rx, handle)
}
