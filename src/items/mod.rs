//! Item system: catalog, equipment slots, inventory and loot tables.

pub mod drops;
pub mod equipment;
pub mod inventory;
pub mod types;

pub use drops::{roll_gold, roll_loot, LootDrop, LootEntry};
pub use equipment::Equipment;
pub use inventory::Inventory;
pub use types::{
    find_catalog_item, find_consumable, CatalogItem, Consumable, EquipmentSlot, EquippedItem,
};
