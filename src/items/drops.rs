use rand::Rng;
use serde::{Deserialize, Serialize};

/// One row of a monster's loot table.
///
/// Each row is rolled independently: with probability `chance_percent` the
/// player receives a uniform quantity in `[min_qty, max_qty]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LootEntry {
    pub item: &'static str,
    pub min_qty: u32,
    pub max_qty: u32,
    pub chance_percent: f64,
}

impl LootEntry {
    pub const fn new(item: &'static str, min_qty: u32, max_qty: u32, chance_percent: f64) -> Self {
        Self {
            item,
            min_qty,
            max_qty,
            chance_percent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootDrop {
    pub item: String,
    pub quantity: u32,
}

/// Rolls every entry of a loot table.
pub fn roll_loot(table: &[LootEntry], rng: &mut impl Rng) -> Vec<LootDrop> {
    table
        .iter()
        .filter_map(|entry| roll_entry(entry, rng))
        .collect()
}

/// Rolls a single loot table row.
pub fn roll_entry(entry: &LootEntry, rng: &mut impl Rng) -> Option<LootDrop> {
    if rng.gen::<f64>() * 100.0 >= entry.chance_percent {
        return None;
    }
    let quantity = roll_quantity(entry.min_qty, entry.max_qty, rng);
    Some(LootDrop {
        item: entry.item.to_string(),
        quantity,
    })
}

fn roll_quantity(min: u32, max: u32, rng: &mut impl Rng) -> u32 {
    if max <= min {
        min
    } else {
        rng.gen_range(min..=max)
    }
}

/// Uniform gold reward in `[min, max]`.
pub fn roll_gold(range: (u32, u32), rng: &mut impl Rng) -> u32 {
    roll_quantity(range.0, range.1, rng)
}
