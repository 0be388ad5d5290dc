use crate::core::errors::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Accessory,
}

impl EquipmentSlot {
    pub fn all() -> [EquipmentSlot; 3] {
        [
            EquipmentSlot::Weapon,
            EquipmentSlot::Armor,
            EquipmentSlot::Accessory,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "Weapon",
            EquipmentSlot::Armor => "Armor",
            EquipmentSlot::Accessory => "Accessory",
        }
    }
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EquipmentSlot {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weapon" => Ok(EquipmentSlot::Weapon),
            "armor" | "armour" => Ok(EquipmentSlot::Armor),
            "accessory" => Ok(EquipmentSlot::Accessory),
            other => Err(GameError::Validation(format!(
                "Unknown slot '{}'. Valid slots: weapon, armor, accessory",
                other
            ))),
        }
    }
}

/// An item sitting in an equipment slot, with its flat stat bonuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquippedItem {
    pub name: String,
    #[serde(default)]
    pub attack: u32,
    #[serde(default)]
    pub defense: u32,
}

impl EquippedItem {
    pub fn new(name: impl Into<String>, attack: u32, defense: u32) -> Self {
        Self {
            name: name.into(),
            attack,
            defense,
        }
    }

    /// `"Goblin Sword (ATK +5)"`
    pub fn describe(&self) -> String {
        let mut bonuses = Vec::new();
        if self.attack > 0 {
            bonuses.push(format!("ATK +{}", self.attack));
        }
        if self.defense > 0 {
            bonuses.push(format!("DEF +{}", self.defense));
        }
        if bonuses.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, bonuses.join(", "))
        }
    }
}

/// Static description of an equippable item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogItem {
    pub name: &'static str,
    pub slot: EquipmentSlot,
    pub attack: u32,
    pub defense: u32,
}

impl CatalogItem {
    pub fn to_equipped(&self) -> EquippedItem {
        EquippedItem::new(self.name, self.attack, self.defense)
    }
}

pub const ITEM_CATALOG: &[CatalogItem] = &[
    CatalogItem {
        name: "Rusty Sword",
        slot: EquipmentSlot::Weapon,
        attack: 5,
        defense: 0,
    },
    CatalogItem {
        name: "Leather Armor",
        slot: EquipmentSlot::Armor,
        attack: 0,
        defense: 3,
    },
    CatalogItem {
        name: "Goblin Sword",
        slot: EquipmentSlot::Weapon,
        attack: 5,
        defense: 0,
    },
    CatalogItem {
        name: "Goblin Shield",
        slot: EquipmentSlot::Armor,
        attack: 0,
        defense: 5,
    },
    CatalogItem {
        name: "Bold Gaze",
        slot: EquipmentSlot::Accessory,
        attack: 3,
        defense: 3,
    },
];

/// Looks up an equippable item by name, ignoring case.
pub fn find_catalog_item(name: &str) -> Option<&'static CatalogItem> {
    let name = name.trim();
    ITEM_CATALOG
        .iter()
        .find(|item| item.name.eq_ignore_ascii_case(name))
}

/// A single-use item that restores HP and/or MP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Consumable {
    pub name: &'static str,
    pub hp: u32,
    pub mp: u32,
}

pub const CONSUMABLES: &[Consumable] = &[
    Consumable {
        name: "Health Potion",
        hp: 50,
        mp: 0,
    },
    Consumable {
        name: "Mana Potion",
        hp: 0,
        mp: 20,
    },
    Consumable {
        name: "Elixir",
        hp: 100,
        mp: 40,
    },
];

/// Looks up a consumable by name, ignoring case.
pub fn find_consumable(name: &str) -> Option<&'static Consumable> {
    let name = name.trim();
    CONSUMABLES
        .iter()
        .find(|item| item.name.eq_ignore_ascii_case(name))
}
