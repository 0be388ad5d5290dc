//! Turn resolution: one player action followed by the monsters' replies.

use super::monsters::{spawn_monster, OnHit, Species};
use super::status::{add_status, has_status, remove_status, tick_statuses, StatusEffect, StatusKind};
use super::types::*;
use crate::character::Player;
use crate::core::combat_math::*;
use crate::core::config::CombatTuning;
use crate::core::constants::*;
use crate::core::errors::{GameError, GameResult};
use rand::Rng;

/// Resolves one round of combat.
///
/// Validation happens before anything else: an unknown skill number, too
/// little mana or a consumable that is not in the bag returns an error and
/// leaves player and session untouched.
/// Otherwise the player acts, every living monster replies, status effects
/// tick, and the report says whether the battle ended.
pub fn resolve_round<R: Rng>(
    player: &mut Player,
    session: &mut BattleSession,
    action: PlayerAction,
    tuning: &CombatTuning,
    rng: &mut R,
) -> GameResult<RoundReport> {
    if session.is_over() {
        return Err(GameError::InvalidState(
            "This battle is already over.".to_string(),
        ));
    }
    let skill = match action {
        PlayerAction::Skill(number) => {
            let skill = skill_by_number(number)?;
            if player.current_mp < skill.mp_cost {
                return Err(GameError::InsufficientMana {
                    needed: skill.mp_cost,
                    available: player.current_mp,
                });
            }
            Some(skill)
        }
        PlayerAction::UseItem(item) => {
            if player.inventory.count(item.name) == 0 {
                return Err(GameError::Validation(format!(
                    "You don't have {} in your inventory.",
                    item.name
                )));
            }
            None
        }
        _ => None,
    };

    session.round += 1;
    let mut events = Vec::new();

    if has_status(&session.player_statuses, StatusKind::Frozen) {
        events.push(CombatEvent::PlayerFrozen {
            player: player.name.clone(),
        });
    } else {
        match (action, skill) {
            (PlayerAction::Skill(_), Some(skill)) => {
                player.current_mp -= skill.mp_cost;
                use_skill(player, session, skill, tuning, rng, &mut events);
            }
            (PlayerAction::UseItem(item), _) => {
                if let Ok(recovery) = player.use_consumable(item) {
                    events.push(CombatEvent::ItemUsed {
                        player: player.name.clone(),
                        recovery,
                    });
                }
            }
            (PlayerAction::Flee, _) => {
                if roll_chance(tuning.flee_chance, rng) {
                    events.push(CombatEvent::FleeSucceeded {
                        player: player.name.clone(),
                    });
                    return Ok(finish(session, events, BattleOutcome::Fled));
                }
                events.push(CombatEvent::FleeFailed {
                    player: player.name.clone(),
                });
            }
            _ => player_attack(player, session, tuning, rng, &mut events),
        }
    }

    if session.all_defeated() {
        events.push(CombatEvent::Victory);
        return Ok(finish(session, events, BattleOutcome::Victory));
    }

    if monster_turn(player, session, tuning, rng, &mut events) {
        return Ok(defeat(player, session, events));
    }

    events.extend(tick_statuses(
        &player.name,
        &mut player.current_hp,
        &mut session.player_statuses,
    ));
    for monster in session.monsters.iter_mut().filter(|m| m.is_alive()) {
        events.extend(tick_statuses(
            &monster.name,
            &mut monster.current_hp,
            &mut monster.statuses,
        ));
        if !monster.is_alive() {
            events.push(CombatEvent::MonsterDefeated {
                monster: monster.name.clone(),
            });
        }
    }

    if !player.is_alive() {
        return Ok(defeat(player, session, events));
    }
    if session.all_defeated() {
        events.push(CombatEvent::Victory);
        return Ok(finish(session, events, BattleOutcome::Victory));
    }

    session.log.extend(events.iter().map(ToString::to_string));
    Ok(RoundReport::new(events, None))
}

fn player_attack(
    player: &Player,
    session: &mut BattleSession,
    tuning: &CombatTuning,
    rng: &mut impl Rng,
    events: &mut Vec<CombatEvent>,
) {
    let Some(index) = session.target_index() else {
        return;
    };
    let jitter = roll_jitter(tuning.jitter_min, tuning.jitter_max, rng);
    let target = &mut session.monsters[index];
    let damage = calculate_damage(
        player.attack() as f64,
        target.defense,
        tuning.defense_reduction,
        jitter,
    );
    target.take_damage(damage);
    events.push(CombatEvent::PlayerAttack {
        player: player.name.clone(),
        target: target.name.clone(),
        damage,
    });
    if !target.is_alive() {
        events.push(CombatEvent::MonsterDefeated {
            monster: target.name.clone(),
        });
    }
}

fn use_skill(
    player: &mut Player,
    session: &mut BattleSession,
    skill: &Skill,
    tuning: &CombatTuning,
    rng: &mut impl Rng,
    events: &mut Vec<CombatEvent>,
) {
    events.push(CombatEvent::SkillUsed {
        player: player.name.clone(),
        skill: skill.name,
    });

    if skill.healing {
        let amount = calculate_heal(player.max_hp, skill.power);
        player.heal(amount);
        events.push(CombatEvent::PlayerHealed {
            player: player.name.clone(),
            amount,
        });
        return;
    }

    let Some(index) = session.target_index() else {
        return;
    };
    let jitter = roll_jitter(tuning.jitter_min, tuning.jitter_max, rng);
    let target = &mut session.monsters[index];
    let mut damage = calculate_skill_damage(
        player.attack() as f64,
        skill.power,
        target.defense,
        tuning.skill_defense_reduction,
        jitter,
    );
    let reaction = skill.element.reacts_with_wet() && target.has_status(StatusKind::Wet);
    if reaction {
        damage = apply_multiplier(damage, WET_REACTION_MULTIPLIER);
    }
    target.take_damage(damage);
    events.push(CombatEvent::SkillHit {
        target: target.name.clone(),
        damage,
        element: skill.element,
    });
    if reaction {
        events.push(CombatEvent::ElementalReaction {
            target: target.name.clone(),
        });
    }

    match skill.element {
        Element::Fire => {
            if remove_status(&mut target.statuses, StatusKind::Frozen) {
                events.push(CombatEvent::Thawed {
                    target: target.name.clone(),
                });
            }
        }
        Element::Water if target.is_alive() => {
            add_status(&mut target.statuses, StatusEffect::wet());
            events.push(CombatEvent::StatusApplied {
                target: target.name.clone(),
                kind: StatusKind::Wet,
            });
        }
        _ => {}
    }

    if !target.is_alive() {
        events.push(CombatEvent::MonsterDefeated {
            monster: target.name.clone(),
        });
    }
}

/// Every monster alive at the start of the turn acts once. Summons join the
/// fight but wait for the next round. Returns true when the player fell.
fn monster_turn(
    player: &mut Player,
    session: &mut BattleSession,
    tuning: &CombatTuning,
    rng: &mut impl Rng,
    events: &mut Vec<CombatEvent>,
) -> bool {
    let acting = session.monsters.len();
    let player_defense = player.defense();
    let dodge_chance = player.dodge_chance(tuning.player_dodge_per_agi);

    for index in 0..acting {
        let monster = &mut session.monsters[index];
        if !monster.is_alive() {
            continue;
        }
        if monster.has_status(StatusKind::Frozen) {
            events.push(CombatEvent::MonsterFrozen {
                monster: monster.name.clone(),
            });
            continue;
        }

        let template = monster.species.template();
        if template.summoner
            && monster.spawn_counter == 0
            && roll_chance(SHAMAN_SUMMON_CHANCE, rng)
        {
            monster.spawn_counter += 1;
            let summoner = monster.name.clone();
            let level = monster.level;
            let summoned = spawn_monster(Species::Goblin, level, rng);
            events.push(CombatEvent::Summoned {
                summoner,
                summoned: summoned.name.clone(),
            });
            session.monsters.push(summoned);
        }

        let monster = &mut session.monsters[index];
        let jitter = roll_jitter(tuning.jitter_min, tuning.jitter_max, rng);
        let damage = calculate_damage(
            monster.attack as f64,
            player_defense,
            tuning.defense_reduction,
            jitter,
        );

        if template.evasive && roll_chance(tuning.evasive_skip_chance, rng) {
            events.push(CombatEvent::MonsterEvaded {
                monster: monster.name.clone(),
            });
            continue;
        }
        if roll_chance(dodge_chance, rng) {
            events.push(CombatEvent::PlayerDodged {
                player: player.name.clone(),
                monster: monster.name.clone(),
            });
            continue;
        }

        player.take_damage(damage);
        events.push(CombatEvent::MonsterAttack {
            monster: monster.name.clone(),
            damage,
        });
        apply_on_hit(
            monster,
            template.on_hit,
            &player.name,
            &mut session.player_statuses,
            rng,
            events,
        );

        if !player.is_alive() {
            return true;
        }
    }
    false
}

/// On-hit effects of a landed monster attack.
pub fn apply_on_hit(
    monster: &mut Monster,
    on_hit: OnHit,
    target: &str,
    target_statuses: &mut Vec<StatusEffect>,
    rng: &mut impl Rng,
    events: &mut Vec<CombatEvent>,
) {
    monster.hit_counter += 1;
    let mut inflict = |effect: StatusEffect, events: &mut Vec<CombatEvent>| {
        events.push(CombatEvent::StatusApplied {
            target: target.to_string(),
            kind: effect.kind,
        });
        add_status(target_statuses, effect);
    };

    match on_hit {
        OnHit::Burn if monster.hit_counter >= 2 => {
            inflict(StatusEffect::burn(monster.level * 2), events);
            monster.hit_counter = 0;
        }
        OnHit::Soak => {
            inflict(StatusEffect::wet(), events);
            monster.hit_counter = 0;
            if monster.level >= HYDRO_FREEZE_MIN_LEVEL {
                events.push(CombatEvent::EngulfAttempt {
                    monster: monster.name.clone(),
                    target: target.to_string(),
                });
                if roll_chance(HYDRO_FREEZE_CHANCE, rng) {
                    inflict(StatusEffect::frozen(), events);
                }
            }
        }
        OnHit::Freeze if monster.hit_counter >= 2 => {
            inflict(StatusEffect::frozen(), events);
            monster.hit_counter = 0;
        }
        OnHit::Bleed => {
            if roll_chance(GOBLIN_BLEED_CHANCE, rng) {
                inflict(StatusEffect::bleed(monster.level), events);
            }
        }
        OnHit::Poison => inflict(StatusEffect::poison(monster.level), events),
        _ => {}
    }
}

/// Floors the player at 1 HP and ends the battle as a defeat.
fn defeat(player: &mut Player, session: &mut BattleSession, mut events: Vec<CombatEvent>) -> RoundReport {
    player.current_hp = 1;
    player.deaths += 1;
    events.push(CombatEvent::PlayerDefeated {
        player: player.name.clone(),
    });
    finish(session, events, BattleOutcome::Defeat)
}

fn finish(
    session: &mut BattleSession,
    events: Vec<CombatEvent>,
    outcome: BattleOutcome,
) -> RoundReport {
    session.state = BattleState::Ended(outcome);
    session.player_statuses.clear();
    session.log.extend(events.iter().map(ToString::to_string));
    RoundReport::new(events, Some(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::AttributeType;
    use crate::items::find_consumable;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    /// Tuning where nothing random happens except explicit chances.
    fn fixed() -> CombatTuning {
        CombatTuning {
            player_dodge_per_agi: 0.0,
            evasive_skip_chance: 0.0,
            ..CombatTuning::without_jitter()
        }
    }

    fn monster(species: Species, hp: u32, attack: u32) -> Monster {
        let mut m = spawn_monster(species, 1, &mut rng());
        m.max_hp = hp;
        m.current_hp = hp;
        m.attack = attack;
        m
    }

    fn setup(m: Monster) -> (Player, BattleSession) {
        let player = Player::new("1", "Aria", 3);
        let session = BattleSession::new("1", m);
        (player, session)
    }

    #[test]
    fn test_basic_attack_damage() {
        // attack 13 vs defense 4: 13 - 2 = 11
        let (mut player, mut session) = setup(monster(Species::Slime, 100, 1));
        let report =
            resolve_round(&mut player, &mut session, PlayerAction::Attack, &fixed(), &mut rng())
                .unwrap();
        assert!(!report.ended);
        assert_eq!(session.monsters[0].current_hp, 89);
        assert_eq!(session.round, 1);
        assert!(report.log[0].contains("for 11 damage"));
    }

    #[test]
    fn test_monster_reply_damage() {
        // monster attack 20 vs player defense 11: 20 - 5.5 = 14.5 rounds to 15
        let (mut player, mut session) = setup(monster(Species::Slime, 100, 20));
        resolve_round(&mut player, &mut session, PlayerAction::Attack, &fixed(), &mut rng())
            .unwrap();
        assert_eq!(player.current_hp, 85);
    }

    #[test]
    fn test_victory_when_last_monster_dies() {
        let (mut player, mut session) = setup(monster(Species::Slime, 5, 50));
        let report =
            resolve_round(&mut player, &mut session, PlayerAction::Attack, &fixed(), &mut rng())
                .unwrap();
        assert_eq!(report.outcome, Some(BattleOutcome::Victory));
        assert!(report.ended);
        assert!(session.is_over());
        // monsters never got to act
        assert_eq!(player.current_hp, player.max_hp);
    }

    #[test]
    fn test_defeat_floors_hp_at_one() {
        let (mut player, mut session) = setup(monster(Species::Slime, 1000, 500));
        let report =
            resolve_round(&mut player, &mut session, PlayerAction::Attack, &fixed(), &mut rng())
                .unwrap();
        assert_eq!(report.outcome, Some(BattleOutcome::Defeat));
        assert_eq!(player.current_hp, 1);
        assert_eq!(player.deaths, 1);
        assert!(session.player_statuses.is_empty());
    }

    #[test]
    fn test_insufficient_mana_changes_nothing() {
        let (mut player, mut session) = setup(monster(Species::Slime, 100, 20));
        player.current_mp = 4;
        let before = player.clone();
        let err = resolve_round(
            &mut player,
            &mut session,
            PlayerAction::Skill(1),
            &fixed(),
            &mut rng(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            GameError::InsufficientMana {
                needed: 5,
                available: 4
            }
        ));
        assert_eq!(player, before);
        assert_eq!(session.monsters[0].current_hp, 100);
        assert_eq!(session.round, 0);
    }

    #[test]
    fn test_invalid_skill_number() {
        let (mut player, mut session) = setup(monster(Species::Slime, 100, 20));
        let err = resolve_round(
            &mut player,
            &mut session,
            PlayerAction::Skill(9),
            &fixed(),
            &mut rng(),
        )
        .unwrap_err();
        assert!(matches!(err, GameError::Validation(_)));
    }

    #[test]
    fn test_skill_consumes_mana_and_hits() {
        // Power Strike: 13 * 1.5 = 19.5 - 2 = 17.5 rounds to 18
        let (mut player, mut session) = setup(monster(Species::Slime, 100, 1));
        resolve_round(
            &mut player,
            &mut session,
            PlayerAction::Skill(1),
            &fixed(),
            &mut rng(),
        )
        .unwrap();
        assert_eq!(player.current_mp, player.max_mp - 5);
        assert_eq!(session.monsters[0].current_hp, 82);
    }

    #[test]
    fn test_heal_skill_caps_at_max() {
        let (mut player, mut session) = setup(monster(Species::Slime, 100, 1));
        player.current_hp = 80;
        resolve_round(
            &mut player,
            &mut session,
            PlayerAction::Skill(3),
            &fixed(),
            &mut rng(),
        )
        .unwrap();
        // healed to full, then the slime hits for 1
        assert_eq!(player.current_hp, player.max_hp - 1);
    }

    #[test]
    fn test_water_then_ice_reaction() {
        let (mut player, mut session) = setup(monster(Species::Slime, 500, 1));
        resolve_round(&mut player, &mut session, PlayerAction::Skill(5), &fixed(), &mut rng())
            .unwrap();
        assert!(session.monsters[0].has_status(StatusKind::Wet));
        let hp_before = session.monsters[0].current_hp;
        let report = resolve_round(
            &mut player,
            &mut session,
            PlayerAction::Skill(4),
            &fixed(),
            &mut rng(),
        )
        .unwrap();
        // Ice Shard: 13 * 1.6 = 20.8 - 2 = 18.8 -> 19, x1.5 = 28.5 -> 29
        assert_eq!(hp_before - session.monsters[0].current_hp, 29);
        assert!(report
            .events
            .iter()
            .any(|e| matches!(e, CombatEvent::ElementalReaction { .. })));
    }

    #[test]
    fn test_fire_thaws_frozen_monster() {
        let mut m = monster(Species::Slime, 500, 1);
        m.statuses.push(StatusEffect::frozen());
        let (mut player, mut session) = setup(m);
        let report = resolve_round(
            &mut player,
            &mut session,
            PlayerAction::Skill(2),
            &fixed(),
            &mut rng(),
        )
        .unwrap();
        assert!(!session.monsters[0].has_status(StatusKind::Frozen));
        assert!(report
            .events
            .iter()
            .any(|e| matches!(e, CombatEvent::Thawed { .. })));
    }

    #[test]
    fn test_frozen_monster_skips_turn() {
        let mut m = monster(Species::Slime, 500, 50);
        m.statuses.push(StatusEffect::frozen());
        let (mut player, mut session) = setup(m);
        resolve_round(&mut player, &mut session, PlayerAction::Attack, &fixed(), &mut rng())
            .unwrap();
        assert_eq!(player.current_hp, player.max_hp);
    }

    #[test]
    fn test_frozen_player_forfeits_action() {
        let (mut player, mut session) = setup(monster(Species::Slime, 100, 1));
        session.player_statuses.push(StatusEffect::frozen());
        let report =
            resolve_round(&mut player, &mut session, PlayerAction::Attack, &fixed(), &mut rng())
                .unwrap();
        assert_eq!(session.monsters[0].current_hp, 100);
        assert!(matches!(report.events[0], CombatEvent::PlayerFrozen { .. }));
    }

    #[test]
    fn test_forced_flee_ends_battle() {
        let tuning = CombatTuning {
            flee_chance: 1.0,
            ..fixed()
        };
        let (mut player, mut session) = setup(monster(Species::Slime, 100, 20));
        let report =
            resolve_round(&mut player, &mut session, PlayerAction::Flee, &tuning, &mut rng())
                .unwrap();
        assert_eq!(report.outcome, Some(BattleOutcome::Fled));
        assert_eq!(player.current_hp, player.max_hp);
    }

    #[test]
    fn test_failed_flee_lets_monsters_act() {
        let tuning = CombatTuning {
            flee_chance: 0.0,
            ..fixed()
        };
        let (mut player, mut session) = setup(monster(Species::Slime, 100, 20));
        let report =
            resolve_round(&mut player, &mut session, PlayerAction::Flee, &tuning, &mut rng())
                .unwrap();
        assert!(!report.ended);
        assert_eq!(player.current_hp, 85);
    }

    #[test]
    fn test_round_after_end_is_rejected() {
        let (mut player, mut session) = setup(monster(Species::Slime, 1, 1));
        resolve_round(&mut player, &mut session, PlayerAction::Attack, &fixed(), &mut rng())
            .unwrap();
        let err =
            resolve_round(&mut player, &mut session, PlayerAction::Attack, &fixed(), &mut rng())
                .unwrap_err();
        assert!(matches!(err, GameError::InvalidState(_)));
    }

    #[test]
    fn test_hydro_soaks_every_hit() {
        let (mut player, mut session) = setup(monster(Species::HydroSlime, 500, 5));
        resolve_round(&mut player, &mut session, PlayerAction::Attack, &fixed(), &mut rng())
            .unwrap();
        assert!(has_status(&session.player_statuses, StatusKind::Wet));
    }

    #[test]
    fn test_pyro_burns_every_second_hit() {
        let mut m = monster(Species::PyroSlime, 500, 5);
        m.level = 3;
        let mut statuses = Vec::new();
        let mut events = Vec::new();
        apply_on_hit(&mut m, OnHit::Burn, "Aria", &mut statuses, &mut rng(), &mut events);
        assert!(statuses.is_empty());
        apply_on_hit(&mut m, OnHit::Burn, "Aria", &mut statuses, &mut rng(), &mut events);
        assert_eq!(statuses, vec![StatusEffect::burn(6)]);
        assert_eq!(m.hit_counter, 0);
    }

    #[test]
    fn test_status_damage_can_defeat_player() {
        let (mut player, mut session) = setup(monster(Species::Slime, 500, 1));
        player.current_hp = 3;
        session.player_statuses.push(StatusEffect::poison(50));
        let report =
            resolve_round(&mut player, &mut session, PlayerAction::Attack, &fixed(), &mut rng())
                .unwrap();
        assert_eq!(report.outcome, Some(BattleOutcome::Defeat));
        assert_eq!(player.current_hp, 1);
    }

    #[test]
    fn test_all_monsters_must_fall() {
        let (mut player, mut session) = setup(monster(Species::Slime, 5, 1));
        session.monsters.push(monster(Species::Slime, 500, 1));
        let report =
            resolve_round(&mut player, &mut session, PlayerAction::Attack, &fixed(), &mut rng())
                .unwrap();
        assert!(!report.ended);
        assert!(!session.monsters[0].is_alive());
        assert_eq!(session.target_index(), Some(1));
    }

    // ====================================================================
    // Potions
    // ====================================================================

    #[test]
    fn test_potion_takes_the_turn() {
        let (mut player, mut session) = setup(monster(Species::Slime, 100, 20));
        player.current_hp = 20;
        player.inventory.add_item("Health Potion", 1, 20).unwrap();
        let potion = find_consumable("Health Potion").unwrap();
        let report = resolve_round(
            &mut player,
            &mut session,
            PlayerAction::UseItem(potion),
            &fixed(),
            &mut rng(),
        )
        .unwrap();
        assert!(matches!(report.events[0], CombatEvent::ItemUsed { .. }));
        assert!(report.log[0].contains("recovers 50 HP"));
        // 20 + 50, then the slime hits for 15
        assert_eq!(player.current_hp, 55);
        assert_eq!(player.inventory.count("Health Potion"), 0);
        assert_eq!(session.monsters[0].current_hp, 100);
    }

    #[test]
    fn test_missing_potion_changes_nothing() {
        let (mut player, mut session) = setup(monster(Species::Slime, 100, 20));
        player.current_hp = 20;
        let before = player.clone();
        let potion = find_consumable("Elixir").unwrap();
        let err = resolve_round(
            &mut player,
            &mut session,
            PlayerAction::UseItem(potion),
            &fixed(),
            &mut rng(),
        )
        .unwrap_err();
        assert!(matches!(err, GameError::Validation(_)));
        assert_eq!(player, before);
        assert_eq!(session.round, 0);
    }

    // ====================================================================
    // Monster traits
    // ====================================================================

    #[test]
    fn test_shaman_summons_one_goblin_that_waits_a_round() {
        let tuning = CombatTuning {
            flee_chance: 0.0,
            ..fixed()
        };
        let (mut player, mut session) = setup(monster(Species::GoblinShaman, 100_000, 1));
        player.attributes.set(AttributeType::Vitality, 1000);
        player.refresh_max_stats();
        player.restore_full();

        let mut rng = rng();
        let mut summoned_in = None;
        for _ in 0..60 {
            let report =
                resolve_round(&mut player, &mut session, PlayerAction::Flee, &tuning, &mut rng)
                    .unwrap();
            assert!(!report.ended);
            let summons = report
                .events
                .iter()
                .filter(|e| matches!(e, CombatEvent::Summoned { .. }))
                .count();
            let goblin_hits = report
                .events
                .iter()
                .filter(|e| matches!(e, CombatEvent::MonsterAttack { monster, .. } if monster == "Goblin"))
                .count();
            match summoned_in {
                None => {
                    assert_eq!(goblin_hits, 0);
                    if summons == 1 {
                        summoned_in = Some(session.round);
                    }
                }
                Some(_) => {
                    assert_eq!(summons, 0);
                    assert_eq!(goblin_hits, 1);
                }
            }
        }
        assert!(summoned_in.is_some());
        assert_eq!(session.monsters.len(), 2);
        assert_eq!(session.monsters[0].spawn_counter, 1);
    }

    #[test]
    fn test_evasive_monster_forfeits_attack() {
        let tuning = CombatTuning {
            evasive_skip_chance: 1.0,
            ..fixed()
        };
        let (mut player, mut session) = setup(monster(Species::GoblinArcher, 500, 50));
        let report =
            resolve_round(&mut player, &mut session, PlayerAction::Attack, &tuning, &mut rng())
                .unwrap();
        assert!(report
            .events
            .iter()
            .any(|e| matches!(e, CombatEvent::MonsterEvaded { .. })));
        assert_eq!(player.current_hp, player.max_hp);
        assert!(session.player_statuses.is_empty());
    }

    #[test]
    fn test_agile_player_dodges() {
        let tuning = CombatTuning {
            player_dodge_per_agi: 0.1,
            ..fixed()
        };
        let (mut player, mut session) = setup(monster(Species::Slime, 500, 50));
        player.attributes.set(AttributeType::Agility, 10);
        let report =
            resolve_round(&mut player, &mut session, PlayerAction::Attack, &tuning, &mut rng())
                .unwrap();
        assert!(report
            .events
            .iter()
            .any(|e| matches!(e, CombatEvent::PlayerDodged { .. })));
        assert_eq!(player.current_hp, player.max_hp);
    }

    #[test]
    fn test_cryo_freezes_every_second_hit() {
        let mut m = monster(Species::CryoSlime, 500, 5);
        let mut statuses = Vec::new();
        let mut events = Vec::new();
        apply_on_hit(&mut m, OnHit::Freeze, "Aria", &mut statuses, &mut rng(), &mut events);
        assert!(statuses.is_empty());
        assert!(events.is_empty());
        apply_on_hit(&mut m, OnHit::Freeze, "Aria", &mut statuses, &mut rng(), &mut events);
        assert!(has_status(&statuses, StatusKind::Frozen));
        assert_eq!(m.hit_counter, 0);
    }

    #[test]
    fn test_goblin_bleed_rate() {
        let mut m = monster(Species::GoblinWarrior, 500, 5);
        let mut rng = rng();
        let trials = 2000;
        let mut bled = 0;
        for _ in 0..trials {
            let mut statuses = Vec::new();
            let mut events = Vec::new();
            apply_on_hit(&mut m, OnHit::Bleed, "Aria", &mut statuses, &mut rng, &mut events);
            if has_status(&statuses, StatusKind::Bleed) {
                bled += 1;
            }
        }
        let rate = bled as f64 / trials as f64;
        assert!((0.15..0.25).contains(&rate), "bleed rate {}", rate);
    }

    #[test]
    fn test_hydro_engulfs_from_level_three() {
        let mut rng = rng();
        let mut m = monster(Species::HydroSlime, 500, 5);
        m.level = 2;
        let mut events = Vec::new();
        for _ in 0..100 {
            apply_on_hit(&mut m, OnHit::Soak, "Aria", &mut Vec::new(), &mut rng, &mut events);
        }
        assert!(!events
            .iter()
            .any(|e| matches!(e, CombatEvent::EngulfAttempt { .. })));

        m.level = 3;
        let trials = 2000;
        let mut frozen = 0;
        for _ in 0..trials {
            let mut statuses = Vec::new();
            let mut events = Vec::new();
            apply_on_hit(&mut m, OnHit::Soak, "Aria", &mut statuses, &mut rng, &mut events);
            assert!(events
                .iter()
                .any(|e| matches!(e, CombatEvent::EngulfAttempt { .. })));
            assert!(has_status(&statuses, StatusKind::Wet));
            if has_status(&statuses, StatusKind::Frozen) {
                frozen += 1;
            }
        }
        let rate = frozen as f64 / trials as f64;
        assert!((0.25..0.35).contains(&rate), "freeze rate {}", rate);
    }
}
