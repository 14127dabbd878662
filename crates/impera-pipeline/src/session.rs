use crate::notify::{Notifier, ToastLevel};
use crate::persister::{self, MoveCommand, MoveResult};
use impera_domain::{BoardState, DragOutcome, DropTarget, Lead, LeadId, PipelineStage};
use impera_store::EntityStore;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

struct PendingMove {
    lead_id: LeadId,
    prior_stage: PipelineStage,
}

/// One board view instance: the visual board state, the drag controller
/// surface, and the pending-move table that ties persister results back to
/// the moves that produced them.
///
/// Drag handling is fully synchronous; only the commit at `end_drag` leaves
/// the session, as a command on the persister queue. A confirmed command is
/// dropped from the pending table; a failed one reverts exactly the lead it
/// moved, to the stage it had when the drag started, unless a newer move of
/// that lead has since taken over its stage.
pub struct BoardSession {
    board: BoardState,
    pending: HashMap<Uuid, PendingMove>,
    commands: mpsc::UnboundedSender<MoveCommand>,
    results: mpsc::UnboundedReceiver<MoveResult>,
    notifier: Arc<dyn Notifier>,
    _worker: JoinHandle<()>,
}

impl BoardSession {
    pub fn new(
        initial: Vec<Lead>,
        store: Arc<dyn EntityStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (commands, results, worker) = persister::spawn(store);
        Self {
            board: BoardState::new(initial),
            pending: HashMap::new(),
            commands,
            results,
            notifier,
            _worker: worker,
        }
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn pending_moves(&self) -> usize {
        self.pending.len()
    }

    pub fn refresh(&mut self, leads: Vec<Lead>) {
        self.board.refresh(leads);
    }

    pub fn begin_drag(&mut self, lead_id: LeadId) {
        self.board.begin_drag(lead_id);
    }

    pub fn drag_over(&mut self, active_id: LeadId, target: DropTarget) {
        self.board.drag_over(active_id, target);
    }

    /// Finalize a gesture: apply the release-time stage, celebrate a won
    /// drop once, and enqueue exactly one persist command for the resolved
    /// move.
    pub fn end_drag(&mut self, active_id: LeadId, over: Option<DropTarget>) -> DragOutcome {
        let outcome = self.board.end_drag(active_id, over);

        if outcome.won {
            self.notifier.celebrate();
        }

        if let Some(intent) = outcome.intent {
            let correlation = Uuid::new_v4();
            self.pending.insert(
                correlation,
                PendingMove {
                    lead_id: intent.lead_id,
                    prior_stage: intent.source_stage,
                },
            );
            let command = MoveCommand {
                correlation,
                lead_id: intent.lead_id,
                target: intent.target_stage,
            };
            if self.commands.send(command).is_err() {
                // Worker is gone; treat like a failed persist.
                if let Some(p) = self.pending.remove(&correlation) {
                    self.board.set_lead_stage(p.lead_id, p.prior_stage);
                }
                self.notifier
                    .toast(ToastLevel::Error, "Falha ao mover o lead");
            }
        }

        outcome
    }

    /// Apply any results that have already arrived, without blocking.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(result) = self.results.try_recv() {
            self.apply(result);
            applied += 1;
        }
        applied
    }

    /// Wait for every in-flight move to confirm or revert.
    pub async fn settle(&mut self) {
        while !self.pending.is_empty() {
            match self.results.recv().await {
                Some(result) => self.apply(result),
                None => break,
            }
        }
    }

    fn apply(&mut self, result: MoveResult) {
        let Some(pending) = self.pending.remove(&result.correlation) else {
            return;
        };
        match result.outcome {
            Ok(()) => {
                tracing::debug!(lead = %result.lead_id, stage = %result.target, "move confirmed");
            }
            Err(e) => {
                // A newer move of the same lead supersedes this revert: the
                // lead's stage now belongs to that move, not to this failed
                // one. Reverting anyway would clobber it.
                let superseded = self
                    .pending
                    .values()
                    .any(|p| p.lead_id == pending.lead_id)
                    || self.board.lead(pending.lead_id).map(|l| l.stage)
                        != Some(result.target);
                if !superseded {
                    self.board
                        .set_lead_stage(pending.lead_id, pending.prior_stage);
                }
                self.notifier.toast(
                    ToastLevel::Error,
                    &format!("Falha ao mover o lead: {}", e),
                );
            }
        }
    }
}
