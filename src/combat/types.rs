use super::monsters::Species;
use super::status::{has_status, StatusEffect, StatusKind};
use crate::character::{PlayerId, Recovery};
use crate::core::combat_math::apply_damage;
use crate::core::errors::{GameError, GameResult};
use crate::items::Consumable;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Element {
    None,
    Fire,
    Water,
    Earth,
    Nature,
    Ice,
    Lightning,
}

impl Element {
    pub fn name(&self) -> &'static str {
        match self {
            Element::None => "None",
            Element::Fire => "Fire",
            Element::Water => "Water",
            Element::Earth => "Earth",
            Element::Nature => "Nature",
            Element::Ice => "Ice",
            Element::Lightning => "Lightning",
        }
    }

    /// Elements that hit harder against a wet target.
    pub fn reacts_with_wet(&self) -> bool {
        matches!(self, Element::Ice | Element::Lightning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Skill {
    pub name: &'static str,
    /// Attack multiplier for damaging skills, max-HP fraction for healing ones.
    pub power: f64,
    pub element: Element,
    pub mp_cost: u32,
    pub healing: bool,
    pub description: &'static str,
}

pub const SKILLS: [Skill; 6] = [
    Skill {
        name: "Power Strike",
        power: 1.5,
        element: Element::None,
        mp_cost: 5,
        healing: false,
        description: "A heavy physical blow",
    },
    Skill {
        name: "Fireball",
        power: 1.8,
        element: Element::Fire,
        mp_cost: 10,
        healing: false,
        description: "Fire damage, thaws frozen targets",
    },
    Skill {
        name: "Heal",
        power: 0.5,
        element: Element::None,
        mp_cost: 15,
        healing: true,
        description: "Restores half of max HP",
    },
    Skill {
        name: "Ice Shard",
        power: 1.6,
        element: Element::Ice,
        mp_cost: 8,
        healing: false,
        description: "Ice damage, bonus against wet targets",
    },
    Skill {
        name: "Water Blast",
        power: 1.7,
        element: Element::Water,
        mp_cost: 9,
        healing: false,
        description: "Water damage, soaks the target",
    },
    Skill {
        name: "Thunder Bolt",
        power: 1.9,
        element: Element::Lightning,
        mp_cost: 12,
        healing: false,
        description: "Lightning damage, bonus against wet targets",
    },
];

/// Looks up a skill by its 1-based number as shown in the skill list.
pub fn skill_by_number(number: usize) -> GameResult<&'static Skill> {
    number
        .checked_sub(1)
        .and_then(|i| SKILLS.get(i))
        .ok_or_else(|| {
            GameError::Validation(format!(
                "Invalid skill number! Choose between 1 and {}.",
                SKILLS.len()
            ))
        })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Monster {
    pub species: Species,
    pub name: String,
    pub level: u32,
    pub max_hp: u32,
    pub current_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub element: Element,
    pub exp_reward: u64,
    #[serde(default)]
    pub statuses: Vec<StatusEffect>,
    /// Hits landed since the last on-hit effect fired.
    #[serde(default)]
    pub hit_counter: u32,
    /// Summons performed by this monster.
    #[serde(default)]
    pub spawn_counter: u32,
}

impl Monster {
    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current_hp = apply_damage(self.current_hp, amount);
    }

    pub fn has_status(&self, kind: StatusKind) -> bool {
        has_status(&self.statuses, kind)
    }

    pub fn describe(&self) -> String {
        format!(
            "{} (Lv. {}) HP: {}/{} ATK: {} DEF: {} Speed: {} Element: {}",
            self.name,
            self.level,
            self.current_hp,
            self.max_hp,
            self.attack,
            self.defense,
            self.speed,
            self.element.name()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Attack,
    /// 1-based skill number.
    Skill(usize),
    /// Drink a consumable; it must be in the bag.
    UseItem(&'static Consumable),
    Flee,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    Victory,
    Defeat,
    Fled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleState {
    InCombat,
    Ended(BattleOutcome),
}

/// Everything that happens during a round, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum CombatEvent {
    Encounter {
        monster: String,
        level: u32,
    },
    PlayerFrozen {
        player: String,
    },
    PlayerAttack {
        player: String,
        target: String,
        damage: u32,
    },
    SkillUsed {
        player: String,
        skill: &'static str,
    },
    PlayerHealed {
        player: String,
        amount: u32,
    },
    ItemUsed {
        player: String,
        recovery: Recovery,
    },
    SkillHit {
        target: String,
        damage: u32,
        element: Element,
    },
    ElementalReaction {
        target: String,
    },
    Thawed {
        target: String,
    },
    FleeSucceeded {
        player: String,
    },
    FleeFailed {
        player: String,
    },
    MonsterFrozen {
        monster: String,
    },
    Summoned {
        summoner: String,
        summoned: String,
    },
    MonsterEvaded {
        monster: String,
    },
    PlayerDodged {
        player: String,
        monster: String,
    },
    MonsterAttack {
        monster: String,
        damage: u32,
    },
    EngulfAttempt {
        monster: String,
        target: String,
    },
    StatusApplied {
        target: String,
        kind: StatusKind,
    },
    StatusDamage {
        target: String,
        kind: StatusKind,
        damage: u32,
    },
    StatusExpired {
        target: String,
        kind: StatusKind,
    },
    MonsterDefeated {
        monster: String,
    },
    PlayerDefeated {
        player: String,
    },
    Victory,
}

impl fmt::Display for CombatEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombatEvent::Encounter { monster, level } => {
                write!(f, "A wild {} (Lv. {}) appears!", monster, level)
            }
            CombatEvent::PlayerFrozen { player } => {
                write!(f, "{} is frozen and can't move!", player)
            }
            CombatEvent::PlayerAttack {
                player,
                target,
                damage,
            } => write!(f, "{} attacks {} for {} damage!", player, target, damage),
            CombatEvent::SkillUsed { player, skill } => write!(f, "{} uses {}!", player, skill),
            CombatEvent::PlayerHealed { player, amount } => {
                write!(f, "{} heals for {} HP!", player, amount)
            }
            CombatEvent::ItemUsed { player, recovery } => match recovery.summary() {
                Some(restored) => {
                    write!(f, "{} uses {} and recovers {}!", player, recovery.item, restored)
                }
                None => write!(f, "{} uses {}, but nothing happens.", player, recovery.item),
            },
            CombatEvent::SkillHit {
                target,
                damage,
                element,
            } => match element {
                Element::None => write!(f, "{} takes {} damage!", target, damage),
                _ => write!(
                    f,
                    "{} takes {} {} damage!",
                    target,
                    damage,
                    element.name().to_lowercase()
                ),
            },
            CombatEvent::ElementalReaction { target } => {
                write!(f, "It's super effective against the soaked {}!", target)
            }
            CombatEvent::Thawed { target } => write!(f, "{} is no longer frozen!", target),
            CombatEvent::FleeSucceeded { player } => {
                write!(f, "{} successfully fled from battle!", player)
            }
            CombatEvent::FleeFailed { player } => write!(f, "{} failed to flee!", player),
            CombatEvent::MonsterFrozen { monster } => {
                write!(f, "{} is frozen and can't move!", monster)
            }
            CombatEvent::Summoned { summoner, summoned } => {
                write!(f, "{} spawns a {}!", summoner, summoned)
            }
            CombatEvent::MonsterEvaded { monster } => write!(f, "{} dodges your attack!", monster),
            CombatEvent::PlayerDodged { player, monster } => {
                write!(f, "{} dodges {}'s attack!", player, monster)
            }
            CombatEvent::MonsterAttack { monster, damage } => {
                write!(f, "{} attacks for {} damage!", monster, damage)
            }
            CombatEvent::EngulfAttempt { monster, target } => {
                write!(f, "{} attempts to engulf {}!", monster, target)
            }
            CombatEvent::StatusApplied { target, kind } => {
                write!(f, "{} is now {}!", target, kind.adjective())
            }
            CombatEvent::StatusDamage {
                target,
                kind,
                damage,
            } => match kind {
                StatusKind::Bleed => write!(f, "{} bleeds for {} damage!", target, damage),
                _ => write!(
                    f,
                    "{} takes {} {} damage!",
                    target,
                    damage,
                    kind.name().to_lowercase()
                ),
            },
            CombatEvent::StatusExpired { target, kind } => {
                write!(f, "{} is no longer {}!", target, kind.adjective())
            }
            CombatEvent::MonsterDefeated { monster } => write!(f, "{} was defeated!", monster),
            CombatEvent::PlayerDefeated { player } => write!(f, "{} was defeated!", player),
            CombatEvent::Victory => write!(f, "Victory!"),
        }
    }
}

/// Result of resolving one round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundReport {
    pub events: Vec<CombatEvent>,
    pub log: Vec<String>,
    pub ended: bool,
    pub outcome: Option<BattleOutcome>,
}

impl RoundReport {
    pub fn new(events: Vec<CombatEvent>, outcome: Option<BattleOutcome>) -> Self {
        let log = events.iter().map(ToString::to_string).collect();
        Self {
            events,
            log,
            ended: outcome.is_some(),
            outcome,
        }
    }

    pub fn message(&self) -> String {
        self.log.join("\n")
    }
}

/// An ongoing fight between one player and one or more monsters.
///
/// The first monster is the one the encounter started with; summons are
/// appended after it.
#[derive(Debug, Clone)]
pub struct BattleSession {
    pub player_id: PlayerId,
    pub monsters: Vec<Monster>,
    /// Effects on the player. They exist only for the life of the session.
    pub player_statuses: Vec<StatusEffect>,
    pub log: Vec<String>,
    pub round: u32,
    pub state: BattleState,
}

impl BattleSession {
    pub fn new(player_id: impl Into<PlayerId>, monster: Monster) -> Self {
        let opening = CombatEvent::Encounter {
            monster: monster.name.clone(),
            level: monster.level,
        };
        Self {
            player_id: player_id.into(),
            monsters: vec![monster],
            player_statuses: Vec::new(),
            log: vec![opening.to_string()],
            round: 0,
            state: BattleState::InCombat,
        }
    }

    pub fn primary(&self) -> Option<&Monster> {
        self.monsters.first()
    }

    pub fn all_defeated(&self) -> bool {
        self.monsters.iter().all(|m| !m.is_alive())
    }

    pub fn living_count(&self) -> usize {
        self.monsters.iter().filter(|m| m.is_alive()).count()
    }

    /// Target of player actions: the first monster still standing.
    pub fn target_index(&self) -> Option<usize> {
        self.monsters.iter().position(Monster::is_alive)
    }

    pub fn is_over(&self) -> bool {
        matches!(self.state, BattleState::Ended(_))
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.state {
            BattleState::Ended(outcome) => Some(outcome),
            BattleState::InCombat => None,
        }
    }

    pub fn describe(&self) -> String {
        self.monsters
            .iter()
            .filter(|m| m.is_alive())
            .map(Monster::describe)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
