//! Inventory building and equip/unequip operators.
//!
//! Armor class is recomputed through `refresh_derived` after every change.

use tracing::{debug, warn};

use super::calculations::refresh_derived;
use crate::aggregates::{Character, MAX_EQUIPPED_WEAPONS};
use crate::events::{AddItemOutcome, EquipOutcome, RemoveItemOutcome, UnequipOutcome};
use crate::rules::{BackgroundRecord, ClassRecord, RuleLookup};
use crate::value_objects::{merge_item, EquipmentChoiceSelection, InventoryItem, ItemGrant};

/// Build the starting inventory, merging repeated slugs.
///
/// Sources in order: the class package for `level`, background equipment,
/// resolved class equipment choices, then explicit additions.
pub(crate) fn build_inventory(
    class: &ClassRecord,
    background: Option<&BackgroundRecord>,
    level: u8,
    choices: &[EquipmentChoiceSelection],
    additions: &[ItemGrant],
) -> Vec<InventoryItem> {
    let mut inventory = Vec::new();
    let mut add = |grant: &ItemGrant| {
        if grant.quantity > 0 {
            merge_item(&mut inventory, &grant.slug, grant.quantity);
        }
    };

    if let Some(package) = class.equipment_package(level) {
        package.items.iter().for_each(&mut add);
    }
    if let Some(background) = background {
        background.equipment.iter().for_each(&mut add);
    }
    for choice in choices {
        match choice.selected_items() {
            Some(items) => items.iter().for_each(&mut add),
            None => warn!(
                choice_id = %choice.choice_id,
                selected = choice.selected,
                "Equipment choice index out of range, skipping"
            ),
        }
    }
    additions.iter().for_each(&mut add);

    inventory
}

fn set_equipped_flag(character: &mut Character, slug: &str, equipped: bool) {
    if let Some(line) = character
        .inventory
        .iter_mut()
        .find(|i| i.equipment_slug() == slug)
    {
        line.set_equipped(equipped);
    }
}

/// Equip the first body armor and up to two weapon-slot items found in the
/// inventory. Used once at creation.
pub(crate) fn auto_equip(character: &mut Character, rules: &dyn RuleLookup) {
    let slugs: Vec<String> = character
        .inventory
        .iter()
        .map(|i| i.equipment_slug().to_string())
        .collect();

    for slug in slugs {
        let Some(record) = rules.equipment(&slug) else {
            debug!(slug = %slug, "Inventory item missing from rule set");
            continue;
        };
        if record.is_body_armor() && character.equipped_armor.is_none() {
            set_equipped_flag(character, &slug, true);
            character.equipped_armor = Some(slug);
        } else if record.uses_weapon_slot()
            && character.equipped_weapons.len() < MAX_EQUIPPED_WEAPONS
        {
            set_equipped_flag(character, &slug, true);
            character.equipped_weapons.push(slug);
        }
    }
}

/// Equip an inventory item.
///
/// Body armor replaces whatever armor is worn. Weapons and shields take a
/// free weapon slot; with both slots full nothing changes.
pub fn equip(
    character: &Character,
    rules: &dyn RuleLookup,
    slug: &str,
) -> (Character, EquipOutcome) {
    if character.inventory_item(slug).is_none() {
        return (character.clone(), EquipOutcome::NotInInventory);
    }
    if character.is_equipped(slug) {
        return (character.clone(), EquipOutcome::AlreadyEquipped);
    }
    let Some(record) = rules.equipment(slug) else {
        return (character.clone(), EquipOutcome::NotEquippable);
    };

    let mut next = character.clone();
    let outcome = if record.is_body_armor() {
        let replaced = next.equipped_armor.take();
        if let Some(old) = &replaced {
            set_equipped_flag(&mut next, old, false);
        }
        set_equipped_flag(&mut next, slug, true);
        next.equipped_armor = Some(slug.to_string());
        EquipOutcome::ArmorEquipped {
            slug: slug.to_string(),
            replaced,
        }
    } else if record.uses_weapon_slot() {
        if next.equipped_weapons.len() >= MAX_EQUIPPED_WEAPONS {
            return (character.clone(), EquipOutcome::WeaponSlotsFull);
        }
        set_equipped_flag(&mut next, slug, true);
        next.equipped_weapons.push(slug.to_string());
        EquipOutcome::WeaponEquipped {
            slug: slug.to_string(),
        }
    } else {
        return (character.clone(), EquipOutcome::NotEquippable);
    };

    refresh_derived(&mut next, rules);
    debug!(character_id = %next.id, slug, armor_class = next.armor_class, "Equipped item");
    (next, outcome)
}

/// Take an item out of whichever slot holds it.
pub fn unequip(
    character: &Character,
    rules: &dyn RuleLookup,
    slug: &str,
) -> (Character, UnequipOutcome) {
    if !character.is_equipped(slug) {
        return (character.clone(), UnequipOutcome::NotEquipped);
    }

    let mut next = character.clone();
    release_slot(&mut next, slug);
    refresh_derived(&mut next, rules);
    (
        next,
        UnequipOutcome::Unequipped {
            slug: slug.to_string(),
        },
    )
}

fn release_slot(character: &mut Character, slug: &str) {
    if character.equipped_armor.as_deref() == Some(slug) {
        character.equipped_armor = None;
    }
    character.equipped_weapons.retain(|w| w != slug);
    set_equipped_flag(character, slug, false);
}

/// Add items to the inventory, merging with an existing line.
pub fn add_item(
    character: &Character,
    rules: &dyn RuleLookup,
    slug: &str,
    quantity: u32,
) -> (Character, AddItemOutcome) {
    if quantity == 0 {
        return (character.clone(), AddItemOutcome::NothingToAdd);
    }
    if rules.equipment(slug).is_none() {
        return (character.clone(), AddItemOutcome::UnknownItem);
    }

    let mut next = character.clone();
    let total = merge_item(&mut next.inventory, slug, quantity);
    refresh_derived(&mut next, rules);
    (
        next,
        AddItemOutcome::Added {
            slug: slug.to_string(),
            total,
        },
    )
}

/// Remove `quantity` of an item; the last one removed also unequips it.
pub fn remove_item(
    character: &Character,
    rules: &dyn RuleLookup,
    slug: &str,
    quantity: u32,
) -> (Character, RemoveItemOutcome) {
    if quantity == 0 {
        return (character.clone(), RemoveItemOutcome::NothingToRemove);
    }
    let Some(current) = character.inventory_item(slug).map(InventoryItem::quantity) else {
        return (character.clone(), RemoveItemOutcome::NotInInventory);
    };

    let mut next = character.clone();
    let outcome = if quantity < current {
        let remaining = current - quantity;
        if let Some(line) = next
            .inventory
            .iter_mut()
            .find(|i| i.equipment_slug() == slug)
        {
            line.set_quantity(remaining);
        }
        RemoveItemOutcome::Decremented {
            slug: slug.to_string(),
            remaining,
        }
    } else {
        let was_equipped = next.is_equipped(slug);
        release_slot(&mut next, slug);
        next.inventory.retain(|i| i.equipment_slug() != slug);
        RemoveItemOutcome::Removed {
            slug: slug.to_string(),
            was_equipped,
        }
    };

    refresh_derived(&mut next, rules);
    (next, outcome)
}
