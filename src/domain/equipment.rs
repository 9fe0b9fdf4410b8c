//! Equipment - ski and wax inventory feeding the gear resolver.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipmentKind {
    Ski,
    Wax,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentItem {
    pub id: String,
    pub name: String,
    pub kind: EquipmentKind,
    pub grip: f32,
    pub glide: f32,
    pub cost: i64,
    pub stock: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquipmentInventory {
    pub items: Vec<EquipmentItem>,
}

impl EquipmentInventory {
    /// Looks up an item by id; `None` ids resolve to `None` rather than
    /// erroring so the gear resolver can fall back to neutral values.
    pub fn find(&self, id: Option<&str>) -> Option<&EquipmentItem> {
        let id = id?;
        self.items.iter().find(|item| item.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_handles_missing_and_unset_ids() {
        let inventory = EquipmentInventory {
            items: vec![EquipmentItem {
                id: "ski-1".into(),
                name: "Test Ski".into(),
                kind: EquipmentKind::Ski,
                grip: 60.0,
                glide: 80.0,
                cost: 1200,
                stock: 8,
            }],
        };
        assert!(inventory.find(Some("ski-1")).is_some());
        assert!(inventory.find(Some("ski-2")).is_none());
        assert!(inventory.find(None).is_none());
    }
}
