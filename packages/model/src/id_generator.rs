use crc32fast::Hasher;
use uuid::Uuid;

/// Source of fresh element identifiers.
///
/// The editor asks for ids and discards any that already exist in the tree,
/// so implementations only need to be unlikely to repeat.
pub trait IdSource: std::fmt::Debug {
    fn next_id(&mut self) -> String;
}

/// Derive a stable seed from a document name using CRC32
pub fn get_document_seed(name: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(name.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Random v4 UUIDs, the format stored by the surrounding application
#[derive(Debug, Default, Clone)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic `<seed>-<n>` ids, for reproducible sessions and tests
#[derive(Debug, Clone)]
pub struct SequentialIds {
    seed: String,
    count: u64,
}

impl SequentialIds {
    pub fn new(document_name: &str) -> Self {
        Self::from_seed(get_document_seed(document_name))
    }

    pub fn from_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            count: 0,
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }
}
