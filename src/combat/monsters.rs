//! Monster roster: species templates, encounter selection and spawning.

use super::types::{Element, Monster};
use crate::core::constants::*;
use crate::items::LootEntry;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Slime,
    PyroSlime,
    HydroSlime,
    GeoSlime,
    DendroSlime,
    CryoSlime,
    Jelly,
    ForestJelly,
    Goblin,
    GoblinTank,
    GoblinWarrior,
    GoblinArcher,
    GoblinThief,
    GoblinShaman,
}

/// Effect a monster inflicts when its attack lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnHit {
    None,
    /// Burn for `level * 2` every second hit.
    Burn,
    /// Wet every hit; from level 3 also a chance to freeze.
    Soak,
    /// Frozen every second hit.
    Freeze,
    /// Chance of indefinite bleeding for `level` per round.
    Bleed,
    /// Poison for `level` per round.
    Poison,
}

#[derive(Debug, Clone, Copy)]
pub struct SpeciesTemplate {
    pub species: Species,
    pub name: &'static str,
    pub element: Element,
    /// HP range at level 0; `hp_per_level` is added for each level.
    pub hp: (u32, u32),
    pub hp_per_level: u32,
    pub attack: (u32, u32),
    pub attack_per_level: u32,
    pub speed: (u32, u32),
    pub exp_per_level: u64,
    pub gold: (u32, u32),
    pub loot: &'static [LootEntry],
    pub weight: u32,
    pub min_player_level: u32,
    pub on_hit: OnHit,
    /// May forfeit its attack ("dodges your attack").
    pub evasive: bool,
    /// May call one Goblin into the fight.
    pub summoner: bool,
}

pub const SLIME_LOOT: &[LootEntry] = &[
    LootEntry::new("Slime Essence", 1, 3, 50.0),
    LootEntry::new("Monster Essence", 1, 6, 50.0),
    LootEntry::new("Health Potion", 1, 1, 10.0),
];

pub const GOBLIN_LOOT: &[LootEntry] = &[
    LootEntry::new("Goblin Bones", 1, 3, 49.0),
    LootEntry::new("Monster Essence", 1, 6, 49.0),
    LootEntry::new("Bold Gaze", 1, 1, 2.0),
    LootEntry::new("Goblin Sword", 1, 1, 5.0),
    LootEntry::new("Goblin Shield", 1, 1, 5.0),
    LootEntry::new("Mana Potion", 1, 1, 8.0),
    LootEntry::new("Elixir", 1, 1, 1.0),
];

const SLIME_GOLD: (u32, u32) = (1, 5);
const GOBLIN_GOLD: (u32, u32) = (5, 15);

const fn slime(
    species: Species,
    name: &'static str,
    element: Element,
    weight: u32,
    on_hit: OnHit,
) -> SpeciesTemplate {
    SpeciesTemplate {
        species,
        name,
        element,
        hp: (20, 30),
        hp_per_level: 10,
        attack: (6, 9),
        attack_per_level: 3,
        speed: (3, 6),
        exp_per_level: 10,
        gold: SLIME_GOLD,
        loot: SLIME_LOOT,
        weight,
        min_player_level: 1,
        on_hit,
        evasive: false,
        summoner: false,
    }
}

const fn goblin(
    species: Species,
    name: &'static str,
    weight: u32,
    hp: (u32, u32),
    attack: (u32, u32),
    on_hit: OnHit,
) -> SpeciesTemplate {
    SpeciesTemplate {
        species,
        name,
        element: Element::None,
        hp,
        hp_per_level: 15,
        attack,
        attack_per_level: 4,
        speed: (8, 12),
        exp_per_level: 8,
        gold: GOBLIN_GOLD,
        loot: GOBLIN_LOOT,
        weight,
        min_player_level: GOBLIN_MIN_PLAYER_LEVEL,
        on_hit,
        evasive: false,
        summoner: false,
    }
}

pub static SPECIES: [SpeciesTemplate; 14] = [
    slime(Species::Slime, "Slime", Element::None, 30, OnHit::None),
    slime(Species::PyroSlime, "Pyro Slime", Element::Fire, 15, OnHit::Burn),
    slime(Species::HydroSlime, "Hydro Slime", Element::Water, 15, OnHit::Soak),
    slime(Species::GeoSlime, "Geo Slime", Element::Earth, 15, OnHit::None),
    slime(Species::DendroSlime, "Dendro Slime", Element::Nature, 10, OnHit::None),
    slime(Species::CryoSlime, "Cryo Slime", Element::Ice, 10, OnHit::Freeze),
    SpeciesTemplate {
        hp: (35, 45),
        exp_per_level: 12,
        ..slime(Species::Jelly, "Jelly", Element::Water, 5, OnHit::None)
    },
    SpeciesTemplate {
        hp: (40, 50),
        exp_per_level: 14,
        ..slime(Species::ForestJelly, "Forest Jelly", Element::Nature, 3, OnHit::None)
    },
    goblin(Species::Goblin, "Goblin", 20, (30, 40), (8, 11), OnHit::None),
    SpeciesTemplate {
        hp_per_level: 22,
        attack_per_level: 3,
        speed: (4, 7),
        exp_per_level: 10,
        ..goblin(Species::GoblinTank, "Goblin Tank", 10, (50, 65), (6, 9), OnHit::None)
    },
    goblin(Species::GoblinWarrior, "Goblin Warrior", 10, (35, 45), (10, 13), OnHit::Bleed),
    SpeciesTemplate {
        evasive: true,
        speed: (12, 16),
        ..goblin(Species::GoblinArcher, "Goblin Archer", 10, (25, 35), (9, 12), OnHit::Bleed)
    },
    SpeciesTemplate {
        evasive: true,
        speed: (14, 18),
        ..goblin(Species::GoblinThief, "Goblin Thief", 10, (25, 35), (8, 11), OnHit::Bleed)
    },
    SpeciesTemplate {
        summoner: true,
        exp_per_level: 10,
        ..goblin(Species::GoblinShaman, "Goblin Shaman", 5, (25, 35), (7, 10), OnHit::Poison)
    },
];

pub fn template(species: Species) -> &'static SpeciesTemplate {
    let index = SPECIES
        .iter()
        .position(|t| t.species == species)
        .unwrap_or(0);
    &SPECIES[index]
}

impl Species {
    pub fn template(&self) -> &'static SpeciesTemplate {
        template(*self)
    }

    pub fn name(&self) -> &'static str {
        self.template().name
    }
}

/// Species a player of `player_level` can run into.
pub fn eligible_species(player_level: u32) -> impl Iterator<Item = &'static SpeciesTemplate> {
    SPECIES
        .iter()
        .filter(move |t| player_level >= t.min_player_level)
}

/// Weighted pick among eligible species.
pub fn choose_species(player_level: u32, rng: &mut impl Rng) -> Option<Species> {
    let total: u32 = eligible_species(player_level).map(|t| t.weight).sum();
    if total == 0 {
        return None;
    }
    let mut roll = rng.gen_range(0..total);
    for t in eligible_species(player_level) {
        if roll < t.weight {
            return Some(t.species);
        }
        roll -= t.weight;
    }
    None
}

/// Player level ± spread, clamped to the valid level range.
pub fn roll_monster_level(player_level: u32, rng: &mut impl Rng) -> u32 {
    let offset = rng.gen_range(-MONSTER_LEVEL_SPREAD..=MONSTER_LEVEL_SPREAD);
    (player_level as i64 + offset as i64).clamp(1, MAX_LEVEL as i64) as u32
}

fn roll_range(range: (u32, u32), bonus: u32, rng: &mut impl Rng) -> u32 {
    let (min, max) = range;
    let value = if max > min {
        rng.gen_range(min..=max)
    } else {
        min
    };
    value + bonus
}

/// Creates a monster of `species` at `level` with rolled stats.
pub fn spawn_monster(species: Species, level: u32, rng: &mut impl Rng) -> Monster {
    let t = species.template();
    let level = level.clamp(1, MAX_LEVEL);
    let max_hp = roll_range(t.hp, t.hp_per_level * level, rng).max(1);
    Monster {
        species,
        name: t.name.to_string(),
        level,
        max_hp,
        current_hp: max_hp,
        attack: roll_range(t.attack, t.attack_per_level * level, rng),
        defense: 3 + level,
        speed: roll_range(t.speed, level, rng),
        element: t.element,
        exp_reward: t.exp_per_level * level as u64,
        statuses: Vec::new(),
        hit_counter: 0,
        spawn_counter: 0,
    }
}

/// Picks and spawns the opening monster of an encounter.
pub fn generate_encounter(player_level: u32, rng: &mut impl Rng) -> Option<Monster> {
    let species = choose_species(player_level, rng)?;
    let level = roll_monster_level(player_level, rng);
    Some(spawn_monster(species, level, rng))
}
