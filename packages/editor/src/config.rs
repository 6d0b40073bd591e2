use crate::view::Device;
use pagesmith_model::{IdSource, SequentialIds, UuidIds};
use serde::{Deserialize, Serialize};

/// How new element ids are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// Random v4 UUIDs
    #[default]
    Uuid,
    /// `<crc32(document)>-<n>`, reproducible across runs
    Sequential,
}

/// Engine settings, usually read from `pagesmith.config.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Undo levels kept (0 = unlimited)
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    #[serde(default)]
    pub default_device: Device,

    #[serde(default)]
    pub id_strategy: IdStrategy,
}

fn default_history_limit() -> usize {
    100
}

impl EditorConfig {
    pub fn id_source(&self, document_name: &str) -> Box<dyn IdSource> {
        match self.id_strategy {
            IdStrategy::Uuid => Box::new(UuidIds),
            IdStrategy::Sequential => Box::new(SequentialIds::new(document_name)),
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            default_device: Device::default(),
            id_strategy: IdStrategy::default(),
        }
    }
}
