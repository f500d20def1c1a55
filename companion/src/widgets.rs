use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::event::UiPayload;
use crate::now_ms;

/// Number of live generative widget slots.
pub const MAX_SLOTS: usize = 4;

/// One occupied slot in the widget workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetSlot {
    pub id: Uuid,
    pub payload: UiPayload,
    pub updated_at: i64,
}

/// Bounded workspace for generated UI results.
///
/// New payloads append while under capacity. At capacity, the slot with
/// the smallest `updated_at` is replaced — strict LRU by update, not by
/// access — with the lowest index winning ties so eviction is
/// deterministic.
#[derive(Debug, Clone, Default)]
pub struct SlotBoard {
    slots: Vec<WidgetSlot>,
}

impl SlotBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a payload stamped with the current time.
    pub fn insert(&mut self, payload: UiPayload) -> Uuid {
        self.insert_at(payload, now_ms())
    }

    /// Insert a payload with an explicit update stamp.
    pub fn insert_at(&mut self, payload: UiPayload, updated_at: i64) -> Uuid {
        let slot = WidgetSlot {
            id: Uuid::new_v4(),
            payload,
            updated_at,
        };
        let id = slot.id;
        if self.slots.len() < MAX_SLOTS {
            self.slots.push(slot);
            return id;
        }
        let victim = self
            .slots
            .iter()
            .enumerate()
            .min_by_key(|(idx, s)| (s.updated_at, *idx))
            .map(|(idx, _)| idx)
            .unwrap_or(0);
        self.slots[victim] = slot;
        id
    }

    /// Refresh a slot's update stamp, deferring its eviction.
    pub fn touch(&mut self, id: Uuid, updated_at: i64) -> bool {
        match self.slots.iter_mut().find(|slot| slot.id == id) {
            Some(slot) => {
                slot.updated_at = updated_at;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: Uuid) -> Option<&WidgetSlot> {
        self.slots.iter().find(|slot| slot.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WidgetSlot> {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::UiType;
    use crate::state::Mood;
    use serde_json::Map;

    fn payload(title: &str) -> UiPayload {
        let mut data = Map::new();
        data.insert("title".into(), title.into());
        UiPayload {
            ui_type: UiType::TextMessage,
            mood: Mood::Calm,
            data,
        }
    }

    fn titles(board: &SlotBoard) -> Vec<String> {
        board
            .iter()
            .map(|slot| {
                slot.payload
                    .data
                    .get("title")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn appends_until_capacity() {
        let mut board = SlotBoard::new();
        for i in 0..MAX_SLOTS {
            board.insert_at(payload(&format!("w{i}")), i as i64);
            assert_eq!(board.len(), i + 1);
        }
    }

    #[test]
    fn at_capacity_the_oldest_update_is_replaced_in_place() {
        let mut board = SlotBoard::new();
        for (i, at) in [1, 2, 3, 4].into_iter().enumerate() {
            board.insert_at(payload(&format!("w{i}")), at);
        }
        board.insert_at(payload("w4"), 5);
        assert_eq!(board.len(), MAX_SLOTS);
        // The slot stamped 1 is gone; the others keep position and stamp.
        assert_eq!(titles(&board), vec!["w4", "w1", "w2", "w3"]);
        let stamps: Vec<i64> = board.iter().map(|s| s.updated_at).collect();
        assert_eq!(stamps, vec![5, 2, 3, 4]);
    }

    #[test]
    fn touch_defers_eviction_to_the_next_oldest() {
        let mut board = SlotBoard::new();
        let mut ids = Vec::new();
        for (i, at) in [1, 2, 3, 4].into_iter().enumerate() {
            ids.push(board.insert_at(payload(&format!("w{i}")), at));
        }
        board.insert_at(payload("w4"), 5); // evicts stamp 1 at index 0

        // Refresh the stamp-2 slot; the next eviction must pick stamp 3,
        // not rotate back to index 1.
        assert!(board.touch(ids[1], 10));
        board.insert_at(payload("w5"), 6);
        assert_eq!(titles(&board), vec!["w4", "w1", "w5", "w3"]);
    }

    #[test]
    fn eviction_tie_breaks_on_lowest_index() {
        let mut board = SlotBoard::new();
        for i in 0..MAX_SLOTS {
            board.insert_at(payload(&format!("w{i}")), 7);
        }
        board.insert_at(payload("winner"), 8);
        assert_eq!(titles(&board), vec!["winner", "w1", "w2", "w3"]);
    }

    #[test]
    fn touching_an_unknown_slot_is_a_no_op() {
        let mut board = SlotBoard::new();
        board.insert_at(payload("w0"), 1);
        assert!(!board.touch(Uuid::new_v4(), 99));
        assert_eq!(board.iter().next().unwrap().updated_at, 1);
    }
}
