use super::types::{find_catalog_item, EquipmentSlot, EquippedItem};
use serde::{Deserialize, Serialize};

/// Player equipment slots.
///
/// New slots need `#[serde(default)]` so older player records keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    #[serde(default)]
    pub weapon: Option<EquippedItem>,
    #[serde(default)]
    pub armor: Option<EquippedItem>,
    #[serde(default)]
    pub accessory: Option<EquippedItem>,
}

impl Equipment {
    pub fn new() -> Self {
        Self {
            weapon: None,
            armor: None,
            accessory: None,
        }
    }

    /// Gear every new character starts with.
    pub fn starter() -> Self {
        let mut equipment = Self::new();
        for name in ["Rusty Sword", "Leather Armor"] {
            if let Some(item) = find_catalog_item(name) {
                equipment.set(item.slot, Some(item.to_equipped()));
            }
        }
        equipment
    }

    pub fn get(&self, slot: EquipmentSlot) -> &Option<EquippedItem> {
        match slot {
            EquipmentSlot::Weapon => &self.weapon,
            EquipmentSlot::Armor => &self.armor,
            EquipmentSlot::Accessory => &self.accessory,
        }
    }

    pub fn set(&mut self, slot: EquipmentSlot, item: Option<EquippedItem>) {
        match slot {
            EquipmentSlot::Weapon => self.weapon = item,
            EquipmentSlot::Armor => self.armor = item,
            EquipmentSlot::Accessory => self.accessory = item,
        }
    }

    /// Puts `item` into `slot`, returning whatever was there before.
    pub fn replace(&mut self, slot: EquipmentSlot, item: EquippedItem) -> Option<EquippedItem> {
        let previous = self.get(slot).clone();
        self.set(slot, Some(item));
        previous
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = &EquippedItem> {
        [&self.weapon, &self.armor, &self.accessory]
            .into_iter()
            .filter_map(|item| item.as_ref())
    }

    pub fn total_attack(&self) -> u32 {
        self.iter_equipped().map(|item| item.attack).sum()
    }

    pub fn total_defense(&self) -> u32 {
        self.iter_equipped().map(|item| item.defense).sum()
    }
}

impl Default for Equipment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equipment_starts_empty() {
        let eq = Equipment::new();
        assert!(eq.weapon.is_none());
        assert_eq!(eq.iter_equipped().count(), 0);
        assert_eq!(eq.total_attack(), 0);
    }

    #[test]
    fn test_starter_gear() {
        let eq = Equipment::starter();
        assert_eq!(eq.weapon.as_ref().map(|w| w.name.as_str()), Some("Rusty Sword"));
        assert_eq!(eq.total_attack(), 5);
        assert_eq!(eq.total_defense(), 3);
        assert!(eq.accessory.is_none());
    }

    #[test]
    fn test_replace_returns_previous() {
        let mut eq = Equipment::starter();
        let previous = eq.replace(EquipmentSlot::Weapon, EquippedItem::new("Goblin Sword", 5, 0));
        assert_eq!(previous.map(|p| p.name), Some("Rusty Sword".to_string()));
        assert_eq!(eq.get(EquipmentSlot::Weapon).as_ref().unwrap().name, "Goblin Sword");
    }

    #[test]
    fn test_totals_sum_all_slots() {
        let mut eq = Equipment::new();
        eq.set(EquipmentSlot::Weapon, Some(EquippedItem::new("A", 5, 0)));
        eq.set(EquipmentSlot::Armor, Some(EquippedItem::new("B", 0, 5)));
        eq.set(EquipmentSlot::Accessory, Some(EquippedItem::new("C", 3, 3)));
        assert_eq!(eq.total_attack(), 8);
        assert_eq!(eq.total_defense(), 8);
    }
}
