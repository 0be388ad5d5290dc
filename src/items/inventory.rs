use crate::core::errors::{GameError, GameResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Item name → count. Capacity limits the number of distinct entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    items: BTreeMap<String, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` of `name`.
    ///
    /// Stacking onto an existing entry always succeeds; a new entry fails with
    /// `InventoryFull` once `capacity` distinct items are held.
    pub fn add_item(&mut self, name: &str, quantity: u32, capacity: usize) -> GameResult<()> {
        if quantity == 0 {
            return Ok(());
        }
        if let Some(count) = self.items.get_mut(name) {
            *count = count.saturating_add(quantity);
            return Ok(());
        }
        if self.items.len() >= capacity {
            return Err(GameError::InventoryFull(name.to_string()));
        }
        self.items.insert(name.to_string(), quantity);
        Ok(())
    }

    pub fn remove_item(&mut self, name: &str, quantity: u32) -> GameResult<()> {
        let count = self.items.get_mut(name).ok_or_else(|| {
            GameError::Validation(format!("You don't have {} in your inventory.", name))
        })?;
        if *count < quantity {
            return Err(GameError::Validation(format!(
                "You only have {} {}.",
                count, name
            )));
        }
        *count -= quantity;
        if *count == 0 {
            self.items.remove(name);
        }
        Ok(())
    }

    pub fn count(&self, name: &str) -> u32 {
        self.items.get(name).copied().unwrap_or(0)
    }

    /// Finds the stored spelling of `name`, ignoring case.
    pub fn find_name(&self, name: &str) -> Option<&str> {
        let name = name.trim();
        self.items
            .keys()
            .find(|key| key.eq_ignore_ascii_case(name))
            .map(|key| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.items.iter().map(|(name, count)| (name.as_str(), *count))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
