use impera_core::{ImperaError, ImperaResult};
use impera_domain::{ChatMessage, Lead};
use serde::{Deserialize, Serialize};

/// Serializable image of the store contents. The CLI's on-disk format and
/// the seed format for `MemoryStore`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataSnapshot {
    #[serde(default)]
    pub leads: Vec<Lead>,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

impl DataSnapshot {
    pub fn to_json_bytes(&self) -> ImperaResult<Vec<u8>> {
        serde_json::to_vec_pretty(self).map_err(|e| ImperaError::Serialization(e.to_string()))
    }

    pub fn from_json_bytes(bytes: &[u8]) -> ImperaResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| ImperaError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use impera_domain::{Lead, LeadSource};

    #[test]
    fn test_roundtrip() {
        let snapshot = DataSnapshot {
            leads: vec![Lead::new(
                "Carla Dias".to_string(),
                "+5511977770000".to_string(),
                LeadSource::Site,
            )],
            messages: vec![],
        };
        let bytes = snapshot.to_json_bytes().unwrap();
        let restored = DataSnapshot::from_json_bytes(&bytes).unwrap();
        assert_eq!(restored.leads.len(), 1);
        assert_eq!(restored.leads[0].name, "Carla Dias");
    }

    #[test]
    fn test_missing_collections_default_empty() {
        let snapshot = DataSnapshot::from_json_bytes(b"{}").unwrap();
        assert!(snapshot.leads.is_empty());
        assert!(snapshot.messages.is_empty());
    }
}
