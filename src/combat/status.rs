//! Status effects carried by combatants during a battle.

use super::types::CombatEvent;
use crate::core::combat_math::apply_damage;
use crate::core::constants::*;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    Burn,
    Wet,
    Frozen,
    Bleed,
    Poison,
}

impl StatusKind {
    pub fn name(&self) -> &'static str {
        match self {
            StatusKind::Burn => "Burn",
            StatusKind::Wet => "Wet",
            StatusKind::Frozen => "Frozen",
            StatusKind::Bleed => "Bleed",
            StatusKind::Poison => "Poison",
        }
    }

    /// Adjective used in "X is now ..." messages.
    pub fn adjective(&self) -> &'static str {
        match self {
            StatusKind::Burn => "burning",
            StatusKind::Wet => "wet",
            StatusKind::Frozen => "frozen",
            StatusKind::Bleed => "bleeding",
            StatusKind::Poison => "poisoned",
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An active effect. `duration` of `None` lasts until the battle ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: StatusKind,
    pub duration: Option<u32>,
    pub damage_per_tick: u32,
}

impl StatusEffect {
    pub fn burn(damage: u32) -> Self {
        Self {
            kind: StatusKind::Burn,
            duration: Some(BURN_DURATION),
            damage_per_tick: damage.max(1),
        }
    }

    pub fn wet() -> Self {
        Self {
            kind: StatusKind::Wet,
            duration: Some(WET_DURATION),
            damage_per_tick: 0,
        }
    }

    pub fn frozen() -> Self {
        Self {
            kind: StatusKind::Frozen,
            duration: Some(FROZEN_DURATION),
            damage_per_tick: 0,
        }
    }

    pub fn bleed(damage: u32) -> Self {
        Self {
            kind: StatusKind::Bleed,
            duration: None,
            damage_per_tick: damage.max(1),
        }
    }

    pub fn poison(damage: u32) -> Self {
        Self {
            kind: StatusKind::Poison,
            duration: Some(POISON_DURATION),
            damage_per_tick: damage.max(1),
        }
    }
}

pub fn has_status(effects: &[StatusEffect], kind: StatusKind) -> bool {
    effects.iter().any(|e| e.kind == kind)
}

/// Applies an effect. Re-applying a kind already present refreshes it
/// (longest duration, strongest damage) instead of stacking.
pub fn add_status(effects: &mut Vec<StatusEffect>, effect: StatusEffect) {
    match effects.iter_mut().find(|e| e.kind == effect.kind) {
        Some(existing) => {
            existing.duration = match (existing.duration, effect.duration) {
                (None, _) | (_, None) => None,
                (Some(a), Some(b)) => Some(a.max(b)),
            };
            existing.damage_per_tick = existing.damage_per_tick.max(effect.damage_per_tick);
        }
        None => effects.push(effect),
    }
}

/// Removes every effect of `kind`. Returns true when something was removed.
pub fn remove_status(effects: &mut Vec<StatusEffect>, kind: StatusKind) -> bool {
    let before = effects.len();
    effects.retain(|e| e.kind != kind);
    effects.len() != before
}

/// Advances all effects on one combatant by a round.
///
/// Periodic damage is applied to `hp`, finite durations count down and
/// effects reaching zero are removed.
pub fn tick_statuses(
    name: &str,
    hp: &mut u32,
    effects: &mut Vec<StatusEffect>,
) -> Vec<CombatEvent> {
    let mut events = Vec::new();
    for effect in effects.iter_mut() {
        if effect.damage_per_tick > 0 {
            *hp = apply_damage(*hp, effect.damage_per_tick);
            events.push(CombatEvent::StatusDamage {
                target: name.to_string(),
                kind: effect.kind,
                damage: effect.damage_per_tick,
            });
        }
        if let Some(remaining) = effect.duration.as_mut() {
            *remaining = remaining.saturating_sub(1);
        }
    }
    effects.retain(|effect| {
        if effect.duration == Some(0) {
            events.push(CombatEvent::StatusExpired {
                target: name.to_string(),
                kind: effect.kind,
            });
            false
        } else {
            true
        }
    });
    events
}
