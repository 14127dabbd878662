use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::stage::PipelineStage;

pub type LeadId = Uuid;

/// Where a lead entered the funnel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadSource {
    #[serde(rename = "Whatsapp")]
    Whatsapp,
    #[serde(rename = "Site")]
    Site,
    #[serde(rename = "Indicação")]
    Indicacao,
    #[serde(rename = "Manual")]
    Manual,
}

/// A lead card on the pipeline board.
///
/// Leads are created and edited elsewhere in the CRM; the board only ever
/// changes `stage`. Deletion is a separate CRUD action and never happens
/// here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: LeadId,
    pub name: String,
    pub phone: String,
    pub source: LeadSource,
    pub stage: PipelineStage,
    pub last_contact_at: DateTime<Utc>,
    #[serde(default)]
    pub value: Option<f64>,
}

impl Lead {
    pub fn new(name: String, phone: String, source: LeadSource) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            phone,
            source,
            stage: PipelineStage::Novo,
            last_contact_at: Utc::now(),
            value: None,
        }
    }

    pub fn set_stage(&mut self, stage: PipelineStage) {
        self.stage = stage;
    }
}
