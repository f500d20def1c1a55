use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::now_ms;

/// One long-term fact the companion holds about its human.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    pub id: Uuid,
    pub text: String,
    pub created_at: i64,
}

/// Long-term memory list. Explicit add/remove only.
#[derive(Debug, Clone, Default)]
pub struct MemoryBank {
    entries: Vec<Memory>,
}

impl MemoryBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, text: impl Into<String>) -> Uuid {
        let memory = Memory {
            id: Uuid::new_v4(),
            text: text.into(),
            created_at: now_ms(),
        };
        let id = memory.id;
        self.entries.push(memory);
        id
    }

    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|memory| memory.id != id);
        self.entries.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &Memory> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
