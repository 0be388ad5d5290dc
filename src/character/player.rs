use super::attributes::{AttributeType, Attributes, StatAllocation};
use super::derived_stats::DerivedStats;
use crate::core::combat_math::{apply_damage, apply_heal};
use crate::core::constants::{MAX_NAME_LENGTH, STARTING_XP_TO_NEXT};
use crate::core::daily_limit::DailyLimit;
use crate::core::errors::{GameError, GameResult};
use crate::items::{
    find_catalog_item, find_consumable, Consumable, Equipment, EquipmentSlot, EquippedItem, Inventory,
};
use serde::{Deserialize, Serialize};

/// Identifier of a player on the hosting chat platform.
pub type PlayerId = String;

/// What one consumable actually restored, after capping at the maximums.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recovery {
    pub item: &'static str,
    pub hp: u32,
    pub mp: u32,
}

impl Recovery {
    /// `"50 HP"`, `"20 MP"`, `"50 HP and 20 MP"`, or `None` when nothing was restored.
    pub fn summary(&self) -> Option<String> {
        match (self.hp, self.mp) {
            (0, 0) => None,
            (hp, 0) => Some(format!("{} HP", hp)),
            (0, mp) => Some(format!("{} MP", mp)),
            (hp, mp) => Some(format!("{} HP and {} MP", hp, mp)),
        }
    }
}

/// The persisted player record.
///
/// One record per player id; it holds everything that survives between
/// commands. Transient combat state (status effects, monsters) lives in the
/// battle session instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub level: u32,
    pub experience: u64,
    pub experience_to_next: u64,
    #[serde(default)]
    pub gold: u64,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub unallocated_points: u32,
    #[serde(default)]
    pub ascension_count: u32,
    pub current_hp: u32,
    pub max_hp: u32,
    pub current_mp: u32,
    pub max_mp: u32,
    #[serde(default)]
    pub inventory: Inventory,
    #[serde(default)]
    pub equipment: Equipment,
    #[serde(default)]
    pub kills: u32,
    #[serde(default)]
    pub deaths: u32,
    #[serde(default)]
    pub total_battles: u32,
    #[serde(flatten)]
    pub daily: DailyLimit,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>, starting_points: u32) -> Self {
        let mut player = Self {
            id: id.into(),
            name: name.into(),
            level: 1,
            experience: 0,
            experience_to_next: STARTING_XP_TO_NEXT,
            gold: 0,
            attributes: Attributes::new(),
            unallocated_points: starting_points,
            ascension_count: 0,
            current_hp: 0,
            max_hp: 0,
            current_mp: 0,
            max_mp: 0,
            inventory: Inventory::new(),
            equipment: Equipment::starter(),
            kills: 0,
            deaths: 0,
            total_battles: 0,
            daily: DailyLimit::new(),
        };
        player.refresh_max_stats();
        player.restore_full();
        player
    }

    pub fn stats(&self) -> DerivedStats {
        DerivedStats::calculate_derived_stats(
            self.level,
            self.ascension_count,
            &self.attributes,
            &self.equipment,
        )
    }

    pub fn attack(&self) -> u32 {
        self.stats().attack
    }

    pub fn defense(&self) -> u32 {
        self.stats().defense
    }

    /// Chance to avoid an incoming monster attack, from AGI.
    pub fn dodge_chance(&self, per_agility: f64) -> f64 {
        (self.attributes.get(AttributeType::Agility) as f64 * per_agility).min(1.0)
    }

    /// Recomputes max HP/MP and clamps the current pools into range.
    pub fn refresh_max_stats(&mut self) {
        let stats = self.stats();
        self.max_hp = stats.max_hp;
        self.max_mp = stats.max_mp;
        self.current_hp = self.current_hp.min(self.max_hp);
        self.current_mp = self.current_mp.min(self.max_mp);
    }

    pub fn restore_full(&mut self) {
        self.current_hp = self.max_hp;
        self.current_mp = self.max_mp;
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current_hp = apply_damage(self.current_hp, amount);
    }

    pub fn heal(&mut self, amount: u32) {
        self.current_hp = apply_heal(self.current_hp, amount, self.max_hp);
    }

    pub fn restore_mana(&mut self, amount: u32) {
        self.current_mp = apply_heal(self.current_mp, amount, self.max_mp);
    }

    /// Spends status points. All-or-nothing: a rejected allocation leaves the
    /// player untouched.
    pub fn allocate(&mut self, allocation: &StatAllocation) -> GameResult<()> {
        let requested = allocation.total();
        if requested == 0 {
            return Err(GameError::Validation(
                "Allocate at least one point, e.g. `allocate vit=1 str=2`.".to_string(),
            ));
        }
        let requested = match u32::try_from(requested) {
            Ok(points) if points <= self.unallocated_points => points,
            _ => {
                return Err(GameError::Validation(format!(
                    "Not enough status points available (have {}, requested {})",
                    self.unallocated_points, requested
                )))
            }
        };
        for (attr, points) in allocation.entries() {
            self.attributes.add_points(*attr, *points);
        }
        self.unallocated_points -= requested;
        self.refresh_max_stats();
        Ok(())
    }

    /// Resolves `name` to a consumable the player is carrying.
    pub fn consumable_in_bag(&self, name: &str) -> GameResult<&'static Consumable> {
        let stored_name = self.inventory.find_name(name).ok_or_else(|| {
            GameError::Validation(format!("You don't have {} in your inventory.", name.trim()))
        })?;
        find_consumable(stored_name)
            .ok_or_else(|| GameError::Validation(format!("{} can't be used.", stored_name)))
    }

    /// Uses one `item` from the bag. Restores are capped at max HP/MP; a
    /// potion drunk at full health is still spent.
    pub fn use_consumable(&mut self, item: &'static Consumable) -> GameResult<Recovery> {
        self.inventory.remove_item(item.name, 1)?;
        let hp_before = self.current_hp;
        let mp_before = self.current_mp;
        self.heal(item.hp);
        self.restore_mana(item.mp);
        Ok(Recovery {
            item: item.name,
            hp: self.current_hp - hp_before,
            mp: self.current_mp - mp_before,
        })
    }

    /// Moves a catalog item from the bag into `slot`.
    ///
    /// Whatever was equipped there goes back into the bag. Returns the item
    /// now equipped.
    pub fn equip(
        &mut self,
        slot: EquipmentSlot,
        item_name: &str,
        capacity: usize,
    ) -> GameResult<EquippedItem> {
        let stored_name = self
            .inventory
            .find_name(item_name)
            .map(str::to_string)
            .ok_or_else(|| {
                GameError::Validation(format!("You don't have {} in your inventory.", item_name))
            })?;
        let catalog = find_catalog_item(&stored_name)
            .ok_or_else(|| GameError::Validation(format!("{} cannot be equipped.", stored_name)))?;
        if catalog.slot != slot {
            return Err(GameError::Validation(format!(
                "{} goes in the {} slot, not {}.",
                catalog.name, catalog.slot, slot
            )));
        }

        // Free the bag entry first so a swap works even when the bag is full.
        self.inventory.remove_item(&stored_name, 1)?;
        let item = catalog.to_equipped();
        if let Some(previous) = self.equipment.replace(slot, item.clone()) {
            if let Err(e) = self.inventory.add_item(&previous.name, 1, capacity) {
                // Roll back so nothing is lost.
                self.equipment.set(slot, Some(previous));
                self.inventory.add_item(&stored_name, 1, capacity + 1)?;
                return Err(e);
            }
        }
        self.refresh_max_stats();
        Ok(item)
    }
}

/// Rejects empty or overlong character names.
pub fn validate_name(name: &str) -> GameResult<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(GameError::Validation("Name cannot be empty".to_string()));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(GameError::Validation(format!(
            "Name must be at most {} characters",
            MAX_NAME_LENGTH
        )));
    }
    Ok(())
}
