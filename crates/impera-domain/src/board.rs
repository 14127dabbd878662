use serde::Serialize;

use crate::lead::{Lead, LeadId};
use crate::stage::PipelineStage;

/// What the pointer is over while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    Card(LeadId),
    Column(PipelineStage),
}

/// A finalized move, produced by `end_drag` and consumed immediately by the
/// status persister. `source_stage` is the stage recorded when the drag
/// started, i.e. the last persisted stage, so a failed persist can revert
/// to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveIntent {
    pub lead_id: LeadId,
    pub source_stage: PipelineStage,
    pub target_stage: PipelineStage,
    pub target_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragOutcome {
    pub intent: Option<MoveIntent>,
    /// True iff the drop resolved to the won stage. Celebration fires once
    /// per such drop and never otherwise.
    pub won: bool,
}

impl DragOutcome {
    fn none() -> Self {
        Self {
            intent: None,
            won: false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct DragOrigin {
    lead_id: LeadId,
    source_stage: PipelineStage,
}

/// The visual arrangement of lead cards across the seven stage columns.
///
/// One flat ordered sequence; a column is the subsequence of leads whose
/// stage matches. Every mutation here is local and synchronous. Nothing in
/// this type talks to the Entity Store, and the in-column order is never
/// persisted: a reload re-sorts by load order.
#[derive(Debug, Clone)]
pub struct BoardState {
    leads: Vec<Lead>,
    drag: Option<DragOrigin>,
}

impl BoardState {
    pub fn new(leads: Vec<Lead>) -> Self {
        Self { leads, drag: None }
    }

    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    pub fn lead(&self, id: LeadId) -> Option<&Lead> {
        self.leads.iter().find(|l| l.id == id)
    }

    /// Cards in one column, in current visual order.
    pub fn column(&self, stage: PipelineStage) -> Vec<&Lead> {
        self.leads.iter().filter(|l| l.stage == stage).collect()
    }

    pub fn dragging(&self) -> Option<LeadId> {
        self.drag.map(|d| d.lead_id)
    }

    /// Replace the arrangement from an external data refresh. Any drag in
    /// progress is abandoned.
    pub fn refresh(&mut self, leads: Vec<Lead>) {
        self.leads = leads;
        self.drag = None;
    }

    /// Record the grabbed card and its stage at grab time. The stage is the
    /// revert point if the eventual persist fails.
    pub fn begin_drag(&mut self, lead_id: LeadId) {
        self.drag = self
            .lead(lead_id)
            .map(|l| DragOrigin {
                lead_id,
                source_stage: l.stage,
            });
    }

    /// Live visual update while the pointer moves. Over a card: the active
    /// card is reinserted at that card's position and takes its stage when
    /// the columns differ. Over an empty column region: the active card
    /// takes that stage and appends. No-op when active and target are the
    /// same card.
    pub fn drag_over(&mut self, active_id: LeadId, target: DropTarget) {
        match target {
            DropTarget::Card(target_id) => {
                if active_id == target_id {
                    return;
                }
                let (Some(active_idx), Some(target_idx)) =
                    (self.index_of(active_id), self.index_of(target_id))
                else {
                    return;
                };
                let target_stage = self.leads[target_idx].stage;
                let mut lead = self.leads.remove(active_idx);
                if lead.stage != target_stage {
                    lead.set_stage(target_stage);
                }
                let insert_at = target_idx.min(self.leads.len());
                self.leads.insert(insert_at, lead);
            }
            DropTarget::Column(stage) => {
                let Some(idx) = self.index_of(active_id) else {
                    return;
                };
                if self.leads[idx].stage != stage {
                    let mut lead = self.leads.remove(idx);
                    lead.set_stage(stage);
                    self.leads.push(lead);
                }
            }
        }
    }

    /// Finalize the gesture. The release-time drop target is authoritative:
    /// whatever columns the card crossed mid-drag, the stage resolved here
    /// is the one that gets persisted. Always clears the drag marker.
    pub fn end_drag(&mut self, active_id: LeadId, over: Option<DropTarget>) -> DragOutcome {
        let origin = self.drag.take();

        let resolved = over.and_then(|target| match target {
            DropTarget::Column(stage) => Some(stage),
            DropTarget::Card(id) => self.lead(id).map(|l| l.stage),
        });
        let Some(target_stage) = resolved else {
            return DragOutcome::none();
        };
        let Some(idx) = self.index_of(active_id) else {
            return DragOutcome::none();
        };

        let source_stage = origin
            .filter(|o| o.lead_id == active_id)
            .map(|o| o.source_stage)
            .unwrap_or(self.leads[idx].stage);

        self.leads[idx].set_stage(target_stage);
        let target_index = self.leads[..idx]
            .iter()
            .filter(|l| l.stage == target_stage)
            .count();

        DragOutcome {
            intent: Some(MoveIntent {
                lead_id: active_id,
                source_stage,
                target_stage,
                target_index,
            }),
            won: target_stage.is_won(),
        }
    }

    /// Put a lead back into a stage directly. Used by the session to revert
    /// a move whose persist failed.
    pub fn set_lead_stage(&mut self, lead_id: LeadId, stage: PipelineStage) {
        if let Some(lead) = self.leads.iter_mut().find(|l| l.id == lead_id) {
            lead.set_stage(stage);
        }
    }

    fn index_of(&self, id: LeadId) -> Option<usize> {
        self.leads.iter().position(|l| l.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lead::LeadSource;

    fn lead(name: &str, stage: PipelineStage) -> Lead {
        let mut lead = Lead::new(
            name.to_string(),
            "+5511900000000".to_string(),
            LeadSource::Manual,
        );
        lead.set_stage(stage);
        lead
    }

    fn board(leads: &[&Lead]) -> BoardState {
        BoardState::new(leads.iter().map(|l| (*l).clone()).collect())
    }

    #[test]
    fn test_column_partition() {
        let a = lead("a", PipelineStage::Novo);
        let b = lead("b", PipelineStage::Novo);
        let c = lead("c", PipelineStage::Fechado);
        let state = board(&[&a, &b, &c]);

        assert_eq!(state.column(PipelineStage::Novo).len(), 2);
        assert_eq!(state.column(PipelineStage::Fechado).len(), 1);
        assert!(state.column(PipelineStage::Perdido).is_empty());
    }

    #[test]
    fn test_drag_over_same_card_is_noop() {
        let a = lead("a", PipelineStage::Novo);
        let mut state = board(&[&a]);
        state.drag_over(a.id, DropTarget::Card(a.id));
        assert_eq!(state.leads()[0].stage, PipelineStage::Novo);
    }

    #[test]
    fn test_drag_over_card_reorders_within_column() {
        let a = lead("a", PipelineStage::Novo);
        let b = lead("b", PipelineStage::Novo);
        let c = lead("c", PipelineStage::Novo);
        let mut state = board(&[&a, &b, &c]);

        state.drag_over(a.id, DropTarget::Card(c.id));
        let order: Vec<_> = state.leads().iter().map(|l| l.id).collect();
        assert_eq!(order, vec![b.id, c.id, a.id]);
    }

    #[test]
    fn test_drag_over_card_in_other_column_reassigns_stage() {
        let a = lead("a", PipelineStage::Novo);
        let b = lead("b", PipelineStage::EmContato);
        let mut state = board(&[&a, &b]);

        state.drag_over(a.id, DropTarget::Card(b.id));
        assert_eq!(state.lead(a.id).unwrap().stage, PipelineStage::EmContato);
    }

    #[test]
    fn test_drag_over_empty_column_appends() {
        let a = lead("a", PipelineStage::Novo);
        let b = lead("b", PipelineStage::Novo);
        let mut state = board(&[&a, &b]);

        state.drag_over(a.id, DropTarget::Column(PipelineStage::Perdido));
        assert_eq!(state.lead(a.id).unwrap().stage, PipelineStage::Perdido);
        assert_eq!(state.leads().last().unwrap().id, a.id);
    }

    #[test]
    fn test_end_drag_release_target_wins_over_intermediate_columns() {
        let a = lead("a", PipelineStage::Novo);
        let mut state = board(&[&a]);

        state.begin_drag(a.id);
        state.drag_over(a.id, DropTarget::Column(PipelineStage::EmContato));
        state.drag_over(a.id, DropTarget::Column(PipelineStage::VisitaAgendada));
        let outcome = state.end_drag(a.id, Some(DropTarget::Column(PipelineStage::EmNegociacao)));

        let intent = outcome.intent.unwrap();
        assert_eq!(intent.target_stage, PipelineStage::EmNegociacao);
        assert_eq!(intent.source_stage, PipelineStage::Novo);
        assert_eq!(
            state.lead(a.id).unwrap().stage,
            PipelineStage::EmNegociacao
        );
        assert!(!outcome.won);
    }

    #[test]
    fn test_end_drag_over_card_uses_that_cards_stage() {
        let a = lead("a", PipelineStage::Novo);
        let b = lead("b", PipelineStage::VisitaRealizada);
        let mut state = board(&[&a, &b]);

        state.begin_drag(a.id);
        let outcome = state.end_drag(a.id, Some(DropTarget::Card(b.id)));
        assert_eq!(
            outcome.intent.unwrap().target_stage,
            PipelineStage::VisitaRealizada
        );
    }

    #[test]
    fn test_end_drag_without_target_resolves_nothing() {
        let a = lead("a", PipelineStage::Novo);
        let mut state = board(&[&a]);

        state.begin_drag(a.id);
        let outcome = state.end_drag(a.id, None);
        assert!(outcome.intent.is_none());
        assert!(!outcome.won);
        assert!(state.dragging().is_none());
    }

    #[test]
    fn test_end_drag_clears_drag_marker_even_on_failure_paths() {
        let a = lead("a", PipelineStage::Novo);
        let mut state = board(&[&a]);

        state.begin_drag(a.id);
        assert_eq!(state.dragging(), Some(a.id));
        state.end_drag(a.id, None);
        assert!(state.dragging().is_none());
    }

    #[test]
    fn test_won_only_on_fechado() {
        let a = lead("a", PipelineStage::Novo);
        let mut state = board(&[&a]);

        state.begin_drag(a.id);
        let outcome = state.end_drag(a.id, Some(DropTarget::Column(PipelineStage::Fechado)));
        assert!(outcome.won);

        state.begin_drag(a.id);
        let outcome = state.end_drag(a.id, Some(DropTarget::Column(PipelineStage::Perdido)));
        assert!(!outcome.won);
    }

    #[test]
    fn test_target_index_counts_position_within_column() {
        let a = lead("a", PipelineStage::EmContato);
        let b = lead("b", PipelineStage::EmContato);
        let c = lead("c", PipelineStage::Novo);
        let mut state = board(&[&a, &b, &c]);

        state.begin_drag(c.id);
        state.drag_over(c.id, DropTarget::Card(b.id));
        let outcome = state.end_drag(c.id, Some(DropTarget::Card(b.id)));
        let intent = outcome.intent.unwrap();
        assert_eq!(intent.target_stage, PipelineStage::EmContato);
        assert_eq!(intent.target_index, 1);
    }

    #[test]
    fn test_refresh_abandons_drag() {
        let a = lead("a", PipelineStage::Novo);
        let mut state = board(&[&a]);
        state.begin_drag(a.id);
        state.refresh(vec![a.clone()]);
        assert!(state.dragging().is_none());
    }
}
