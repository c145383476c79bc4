//! Inventory lines and item grants.

use serde::{Deserialize, Serialize};

/// A quantity of one equipment slug, as granted by packages, choices, or
/// explicit additions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemGrant {
    pub slug: String,
    #[serde(default = "one")]
    pub quantity: u32,
}

fn one() -> u32 {
    1
}

impl ItemGrant {
    pub fn new(slug: impl Into<String>, quantity: u32) -> Self {
        Self {
            slug: slug.into(),
            quantity,
        }
    }
}

/// One line of a character's inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    equipment_slug: String,
    quantity: u32,
    #[serde(default)]
    equipped: bool,
}

impl InventoryItem {
    pub fn new(equipment_slug: impl Into<String>, quantity: u32) -> Self {
        Self {
            equipment_slug: equipment_slug.into(),
            quantity,
            equipped: false,
        }
    }

    pub fn equipment_slug(&self) -> &str {
        &self.equipment_slug
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn equipped(&self) -> bool {
        self.equipped
    }

    pub(crate) fn set_equipped(&mut self, equipped: bool) {
        self.equipped = equipped;
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }
}

/// Add `quantity` of `slug`, merging into an existing line. Returns the new total.
pub(crate) fn merge_item(inventory: &mut Vec<InventoryItem>, slug: &str, quantity: u32) -> u32 {
    if let Some(line) = inventory.iter_mut().find(|i| i.equipment_slug == slug) {
        line.quantity = line.quantity.saturating_add(quantity);
        return line.quantity;
    }
    inventory.push(InventoryItem::new(slug, quantity));
    quantity
}
