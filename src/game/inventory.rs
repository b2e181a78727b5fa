//! # Items and Inventory
//!
//! Item records live in a fixed array on the game state; the inventory holds
//! indices into that array.

use crate::config::MAX_INVENTORY;
use crate::game::Position;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ItemType {
    #[default]
    Weapon,
    Armor,
    Potion,
    Scroll,
    Food,
    Key,
}

impl ItemType {
    pub const ALL: [ItemType; 6] = [
        ItemType::Weapon,
        ItemType::Armor,
        ItemType::Potion,
        ItemType::Scroll,
        ItemType::Food,
        ItemType::Key,
    ];

    /// Maps a draw in `[0, 5]` to a type. Out-of-range values wrap.
    pub fn from_index(idx: u8) -> Self {
        Self::ALL[usize::from(idx) % Self::ALL.len()]
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    /// Display name shown in the inventory screen.
    pub fn name(self) -> &'static str {
        match self {
            ItemType::Weapon => "Sword",
            ItemType::Armor => "Armor",
            ItemType::Potion => "Potion",
            ItemType::Scroll => "Scroll",
            ItemType::Food => "Food",
            ItemType::Key => "Key",
        }
    }

    /// Whether using the item removes it from the inventory.
    ///
    /// Weapons and armor are equipped by overwriting the player's stat and
    /// stay in their slot; keys have no effect yet and are kept.
    pub fn is_consumed_on_use(self) -> bool {
        matches!(self, ItemType::Potion | ItemType::Scroll | ItemType::Food)
    }
}

/// A single item record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Item {
    pub item_type: ItemType,
    pub subtype: u8,
    pub value: u8,
    pub position: Position,
    /// True while lying on the level; false when held or unused
    pub in_world: bool,
}

impl Item {
    pub fn name(&self) -> &'static str {
        self.item_type.name()
    }

    /// Whether this item is lying on the level at `pos`.
    pub fn lies_at(&self, pos: Position) -> bool {
        self.in_world && self.position == pos
    }
}

/// Fixed-slot inventory of indices into the item array.
///
/// # Examples
///
/// ```
/// use caverns::Inventory;
///
/// let mut inventory = Inventory::new();
/// assert_eq!(inventory.insert(4), Some(0));
/// assert_eq!(inventory.get(0), Some(4));
/// assert_eq!(inventory.take(0), Some(4));
/// assert!(inventory.is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Inventory {
    slots: [Option<u8>; MAX_INVENTORY],
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Item index held in `slot`; empty and out-of-range slots give `None`.
    pub fn get(&self, slot: usize) -> Option<u8> {
        self.slots.get(slot).copied().flatten()
    }

    /// Stores `item_idx` in the first empty slot and returns that slot.
    pub fn insert(&mut self, item_idx: u8) -> Option<usize> {
        let slot = self.slots.iter().position(Option::is_none)?;
        self.slots[slot] = Some(item_idx);
        Some(slot)
    }

    /// Empties `slot`, returning what it held.
    pub fn take(&mut self, slot: usize) -> Option<u8> {
        self.slots.get_mut(slot).and_then(Option::take)
    }

    /// Whether any slot references `item_idx`.
    pub fn contains(&self, item_idx: u8) -> bool {
        self.slots.contains(&Some(item_idx))
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// All slots in order, empty ones included.
    pub fn slots(&self) -> &[Option<u8>; MAX_INVENTORY] {
        &self.slots
    }

    pub fn clear(&mut self) {
        self.slots = [None; MAX_INVENTORY];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_type_names() {
        let names: Vec<_> = ItemType::ALL.iter().map(|t| t.name()).collect();
        assert_eq!(names, ["Sword", "Armor", "Potion", "Scroll", "Food", "Key"]);
    }

    #[test]
    fn test_item_type_from_index() {
        for (idx, item_type) in ItemType::ALL.iter().enumerate() {
            assert_eq!(ItemType::from_index(idx as u8), *item_type);
            assert_eq!(item_type.index(), idx as u8);
        }
    }

    #[test]
    fn test_consumption_rules() {
        assert!(!ItemType::Weapon.is_consumed_on_use());
        assert!(!ItemType::Armor.is_consumed_on_use());
        assert!(ItemType::Potion.is_consumed_on_use());
        assert!(ItemType::Scroll.is_consumed_on_use());
        assert!(ItemType::Food.is_consumed_on_use());
        assert!(!ItemType::Key.is_consumed_on_use());
    }

    #[test]
    fn test_inventory_fills_first_empty_slot() {
        let mut inventory = Inventory::new();
        for idx in 0..MAX_INVENTORY as u8 {
            assert_eq!(inventory.insert(idx + 10), Some(usize::from(idx)));
        }
        assert!(inventory.is_full());
        assert_eq!(inventory.insert(99), None);

        inventory.take(3);
        assert_eq!(inventory.insert(99), Some(3));
        assert!(inventory.contains(99));
    }

    #[test]
    fn test_inventory_out_of_range_slot() {
        let mut inventory = Inventory::new();
        inventory.insert(1);
        assert_eq!(inventory.get(MAX_INVENTORY), None);
        assert_eq!(inventory.take(MAX_INVENTORY + 5), None);
        assert_eq!(inventory.len(), 1);
    }
}
