//! Canonical response records.

use serde::{Deserialize, Serialize};

/// A single entity.
///
/// Serializes with explicit `null` for absent members.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub status: Option<String>,
    pub name: Option<String>,
    pub id: Option<String>,
}

/// A fully resolved collection entry. Both members are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub name: String,
    pub id: String,
}

/// A collection of entities, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionRecord {
    pub status: Option<String>,
    pub data: Vec<EntityRef>,
}

impl CollectionRecord {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Outcome of starting a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStartRecord {
    pub status: Option<String>,
    pub report_id: Option<String>,
}
