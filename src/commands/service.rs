//! The command dispatcher shared by every chat host.

use super::parse::Command;
use super::render::{render_help, render_inventory, render_skills, render_stats};
use crate::character::{
    validate_name, JsonPlayerStore, Player, PlayerId, PlayerStore, Recovery, StatAllocation,
};
use crate::combat::{
    generate_encounter, resolve_round, resolve_victory, BattleOutcome, BattleSession,
    CombatEvent, PlayerAction, RoundReport, VictoryReport,
};
use crate::core::constants::MAX_AUTO_BATTLE_ROUNDS;
use crate::core::daily_limit::{time_until_reset, Clock, SystemClock};
use crate::core::errors::{format_duration_secs, ErrorCategory, GameError, GameResult};
use crate::core::GameConfig;
use crate::items::{EquipmentSlot, EquippedItem};
use crate::session::{lock, SessionStore};
use chrono::{Duration, NaiveDateTime};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use std::sync::Mutex;

const NO_CHARACTER: &str = "You don't have a character yet! Use `!create <name>` to make one.";

/// What a chat host sends back to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub success: bool,
    pub message: String,
}

impl CommandOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// One resolved round, plus the payout when it won the battle.
#[derive(Debug, Clone, PartialEq)]
pub struct BattleTurn {
    pub round: RoundReport,
    pub victory: Option<VictoryReport>,
}

impl BattleTurn {
    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.round.outcome
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = self.round.log.clone();
        if let Some(victory) = &self.victory {
            lines.extend(victory.lines());
        }
        if self.outcome() == Some(BattleOutcome::Defeat) {
            lines.push(
                "You're defeated but managed to escape! Use `!rest` to recover before battling again."
                    .to_string(),
            );
        }
        lines
    }
}

/// A whole encounter fought with basic attacks.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoBattleReport {
    pub log: Vec<String>,
    pub outcome: BattleOutcome,
    pub rounds: u32,
    pub victory: Option<VictoryReport>,
}

/// What `use` did: a plain recovery outside combat, or a combat round in
/// which drinking was the player's action.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemUse {
    Field(Recovery),
    Battle(BattleTurn),
}

/// Runs commands for any number of players.
///
/// All methods take `&self`; the service can be shared between threads.
/// Commands for different players run concurrently, while a second command
/// for a player whose previous one is still running fails with
/// `GameError::Busy`.
pub struct GameService {
    config: GameConfig,
    store: Box<dyn PlayerStore>,
    sessions: SessionStore,
    players: Mutex<HashMap<PlayerId, Player>>,
    pending_deletes: Mutex<HashMap<PlayerId, NaiveDateTime>>,
    rng: Mutex<StdRng>,
    clock: Box<dyn Clock>,
}

impl GameService {
    pub fn new(config: GameConfig, store: Box<dyn PlayerStore>) -> Self {
        Self {
            config,
            store,
            sessions: SessionStore::new(),
            players: Mutex::new(HashMap::new()),
            pending_deletes: Mutex::new(HashMap::new()),
            rng: Mutex::new(StdRng::from_entropy()),
            clock: Box::new(SystemClock),
        }
    }

    /// Service backed by JSON files in `config.save_dir`.
    pub fn open(config: GameConfig) -> GameResult<Self> {
        let store = JsonPlayerStore::new(&config.save_dir)?;
        info!("using save directory {}", config.save_dir.display());
        Ok(Self::new(config, Box::new(store)))
    }

    /// Replaces the random source with a seeded one.
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            ..self
        }
    }

    pub fn with_clock(self, clock: impl Clock + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            ..self
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    // ------------------------------------------------------------------
    // Player cache and persistence

    /// The cached record while a battle is running, the stored one otherwise.
    fn load_player(&self, id: &str) -> GameResult<Player> {
        if let Some(player) = lock(&self.players).get(id) {
            return Ok(player.clone());
        }
        match self.store.load(id) {
            Ok(player) => {
                debug!("loaded player {} ({})", id, player.name);
                Ok(player)
            }
            Err(GameError::NotFound(_)) => Err(GameError::NotFound(NO_CHARACTER.to_string())),
            Err(e) => Err(e),
        }
    }

    fn cache(&self, player: &Player) {
        lock(&self.players).insert(player.id.clone(), player.clone());
    }

    /// Writes the record through to the store.
    ///
    /// Only players in combat stay cached. A record that failed to save is
    /// kept in the cache so the next command still sees it.
    fn commit(&self, player: &Player) -> GameResult<()> {
        if let Err(e) = self.store.save(player) {
            warn!("failed to save player {}: {}", player.id, e);
            self.cache(player);
            return Err(e);
        }
        if self.sessions.contains(&player.id) {
            self.cache(player);
        } else {
            lock(&self.players).remove(&player.id);
        }
        Ok(())
    }

    fn delete_expired(&self, requested_at: NaiveDateTime, now: NaiveDateTime) -> bool {
        (now - requested_at).num_seconds() > self.config.confirm_timeout_secs
    }

    fn ensure_not_in_combat(&self, id: &str, what: &str) -> GameResult<()> {
        if self.sessions.contains(id) {
            return Err(GameError::InvalidState(format!(
                "You can't {} during combat!",
                what
            )));
        }
        Ok(())
    }

    /// Snapshot of a player's record.
    pub fn player(&self, id: &str) -> GameResult<Player> {
        self.load_player(id)
    }

    /// Snapshot of a player's current battle.
    pub fn session(&self, id: &str) -> Option<BattleSession> {
        self.sessions.get(id)
    }

    // ------------------------------------------------------------------
    // Commands

    pub fn create_character(&self, id: &str, name: &str) -> GameResult<Player> {
        let _guard = self.sessions.acquire(id)?;
        validate_name(name)?;
        if lock(&self.players).contains_key(id) || self.store.exists(id) {
            return Err(GameError::InvalidState(
                "You already have a character! Use `!stats` to view it.".to_string(),
            ));
        }
        let player = Player::new(id, name.trim(), self.config.starting_stat_points);
        self.commit(&player)?;
        info!("created character {} for player {}", player.name, id);
        Ok(player)
    }

    pub fn stats(&self, id: &str) -> GameResult<String> {
        let _guard = self.sessions.acquire(id)?;
        Ok(render_stats(&self.load_player(id)?))
    }

    pub fn inventory(&self, id: &str) -> GameResult<String> {
        let _guard = self.sessions.acquire(id)?;
        let player = self.load_player(id)?;
        Ok(render_inventory(&player, self.config.inventory_capacity))
    }

    pub fn skills(&self, id: &str) -> GameResult<String> {
        let _guard = self.sessions.acquire(id)?;
        let mp = self.load_player(id).ok().map(|p| p.current_mp);
        Ok(render_skills(mp))
    }

    /// Starts a battle against a random monster, using up one daily battle.
    pub fn start_encounter(&self, id: &str) -> GameResult<BattleSession> {
        let _guard = self.sessions.acquire(id)?;
        self.start_encounter_locked(id)
    }

    fn start_encounter_locked(&self, id: &str) -> GameResult<BattleSession> {
        if self.sessions.contains(id) {
            return Err(GameError::InvalidState(
                "You're already in combat! Use `!attack`, `!skill`, or `!flee`.".to_string(),
            ));
        }
        let mut player = self.load_player(id)?;
        let now = self.clock.now();
        if !player.daily.can_battle(now, self.config.daily_battle_quota) {
            return Err(GameError::DailyLimitReached {
                resets_in_secs: time_until_reset(now).num_seconds(),
            });
        }
        let monster = {
            let mut rng = lock(&self.rng);
            generate_encounter(player.level, &mut *rng)
        }
        .ok_or_else(|| {
            GameError::InvalidState("No monsters available for encounter at your level!".to_string())
        })?;

        player
            .daily
            .record_battle(now, self.config.daily_battle_quota)?;
        player.total_battles += 1;

        let session = BattleSession::new(id, monster);
        self.sessions.insert(session.clone())?;
        self.commit(&player)?;
        info!(
            "player {} encountered {} (Lv. {})",
            id, session.monsters[0].name, session.monsters[0].level
        );
        Ok(session)
    }

    /// Resolves one round of the player's current battle.
    pub fn act(&self, id: &str, action: PlayerAction) -> GameResult<BattleTurn> {
        let _guard = self.sessions.acquire(id)?;
        self.act_locked(id, action)
    }

    fn act_locked(&self, id: &str, action: PlayerAction) -> GameResult<BattleTurn> {
        let mut player = self.load_player(id)?;
        let turn = self.sessions.with_session(id, |session| {
            let mut rng = lock(&self.rng);
            let round = resolve_round(&mut player, session, action, &self.config.combat, &mut *rng)?;
            let victory = match round.outcome {
                Some(BattleOutcome::Victory) => Some(resolve_victory(
                    &mut player,
                    &session.monsters,
                    &self.config,
                    &mut *rng,
                )),
                _ => None,
            };
            Ok(BattleTurn { round, victory })
        })?;

        if let Some(outcome) = turn.outcome() {
            info!("battle for player {} ended: {:?}", id, outcome);
            self.commit(&player)?;
        } else {
            self.cache(&player);
        }
        Ok(turn)
    }

    pub fn attack(&self, id: &str) -> GameResult<BattleTurn> {
        self.act(id, PlayerAction::Attack)
    }

    pub fn use_skill(&self, id: &str, number: usize) -> GameResult<BattleTurn> {
        self.act(id, PlayerAction::Skill(number))
    }

    pub fn flee(&self, id: &str) -> GameResult<BattleTurn> {
        self.act(id, PlayerAction::Flee)
    }

    /// Drinks a consumable from the bag. In combat this is the player's
    /// action for the round.
    pub fn use_item(&self, id: &str, item: &str) -> GameResult<ItemUse> {
        let _guard = self.sessions.acquire(id)?;
        let mut player = self.load_player(id)?;
        let consumable = player.consumable_in_bag(item)?;
        if self.sessions.contains(id) {
            let turn = self.act_locked(id, PlayerAction::UseItem(consumable))?;
            return Ok(ItemUse::Battle(turn));
        }
        let recovery = player.use_consumable(consumable)?;
        self.commit(&player)?;
        Ok(ItemUse::Field(recovery))
    }

    /// Fights one full encounter with basic attacks.
    pub fn auto_battle(&self, id: &str) -> GameResult<AutoBattleReport> {
        let _guard = self.sessions.acquire(id)?;
        let session = self.start_encounter_locked(id)?;
        let mut log = session.log;

        for round in 1..=MAX_AUTO_BATTLE_ROUNDS {
            let turn = self.act_locked(id, PlayerAction::Attack)?;
            log.extend(turn.lines());
            if let Some(outcome) = turn.outcome() {
                return Ok(AutoBattleReport {
                    log,
                    outcome,
                    rounds: round,
                    victory: turn.victory,
                });
            }
        }

        // Stalemate: walk away.
        self.sessions.remove(id);
        let player = self.load_player(id)?;
        self.commit(&player)?;
        log.push(format!(
            "{} gave up after {} rounds and left the battle.",
            player.name, MAX_AUTO_BATTLE_ROUNDS
        ));
        Ok(AutoBattleReport {
            log,
            outcome: BattleOutcome::Fled,
            rounds: MAX_AUTO_BATTLE_ROUNDS,
            victory: None,
        })
    }

    pub fn allocate(&self, id: &str, allocation: &StatAllocation) -> GameResult<Player> {
        let _guard = self.sessions.acquire(id)?;
        let mut player = self.load_player(id)?;
        player.allocate(allocation)?;
        self.commit(&player)?;
        Ok(player)
    }

    pub fn equip(&self, id: &str, slot: EquipmentSlot, item: &str) -> GameResult<EquippedItem> {
        let _guard = self.sessions.acquire(id)?;
        self.ensure_not_in_combat(id, "change equipment")?;
        let mut player = self.load_player(id)?;
        let equipped = player.equip(slot, item, self.config.inventory_capacity)?;
        self.commit(&player)?;
        Ok(equipped)
    }

    pub fn save(&self, id: &str) -> GameResult<()> {
        let _guard = self.sessions.acquire(id)?;
        let player = self.load_player(id)?;
        self.commit(&player)?;
        info!("saved player {}", id);
        Ok(())
    }

    /// Replaces the in-memory record with the stored one.
    pub fn load(&self, id: &str) -> GameResult<Player> {
        let _guard = self.sessions.acquire(id)?;
        self.ensure_not_in_combat(id, "load a save")?;
        let player = match self.store.load(id) {
            Ok(player) => player,
            Err(GameError::NotFound(_)) => {
                return Err(GameError::NotFound(
                    "No save file found. Use `!create <name>` to start a new character.".to_string(),
                ))
            }
            Err(e) => return Err(e),
        };
        lock(&self.players).remove(id);
        info!("reloaded player {} from storage", id);
        Ok(player)
    }

    /// Battles left today. Never changes the counter.
    pub fn battles_remaining_today(&self, id: &str) -> GameResult<u32> {
        let player = self.load_player(id)?;
        Ok(player
            .daily
            .battles_remaining(self.clock.now(), self.config.daily_battle_quota))
    }

    pub fn time_until_reset(&self) -> Duration {
        time_until_reset(self.clock.now())
    }

    pub fn rest(&self, id: &str) -> GameResult<Player> {
        let _guard = self.sessions.acquire(id)?;
        self.ensure_not_in_combat(id, "rest")?;
        let mut player = self.load_player(id)?;
        player.restore_full();
        self.commit(&player)?;
        Ok(player)
    }

    /// First step of deleting a character; must be confirmed in time.
    pub fn request_delete(&self, id: &str) -> GameResult<()> {
        let _guard = self.sessions.acquire(id)?;
        self.load_player(id)?;
        let now = self.clock.now();
        let mut pending = lock(&self.pending_deletes);
        pending.retain(|_, requested_at| !self.delete_expired(*requested_at, now));
        pending.insert(id.to_string(), now);
        Ok(())
    }

    /// Completes a pending deletion. Returns false when the answer was not
    /// `YES`, which cancels the request.
    pub fn confirm_delete(&self, id: &str, answer: &str) -> GameResult<bool> {
        let _guard = self.sessions.acquire(id)?;
        let now = self.clock.now();
        let requested_at = {
            let mut pending = lock(&self.pending_deletes);
            let own = pending.remove(id);
            pending.retain(|_, requested_at| !self.delete_expired(*requested_at, now));
            own
        }
        .ok_or_else(|| GameError::InvalidState("There is nothing to confirm.".to_string()))?;
        if self.delete_expired(requested_at, now) {
            return Err(GameError::InvalidState(
                "Confirmation timed out. Character deletion cancelled.".to_string(),
            ));
        }
        if answer.trim() != "YES" {
            return Ok(false);
        }
        self.store.delete(id)?;
        lock(&self.players).remove(id);
        self.sessions.remove(id);
        info!("deleted character for player {}", id);
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Text surface

    /// Parses and runs one chat line.
    pub fn execute_line(&self, id: &str, line: &str) -> CommandOutcome {
        match line.parse::<Command>() {
            Ok(command) => self.execute(id, &command),
            Err(e) => CommandOutcome::failed(e.to_string()),
        }
    }

    /// Runs a command and renders the reply. Errors become failed outcomes.
    pub fn execute(&self, id: &str, command: &Command) -> CommandOutcome {
        match self.dispatch(id, command) {
            Ok(message) => CommandOutcome::ok(message),
            Err(e) => {
                match e.category() {
                    ErrorCategory::Persistence => warn!("{:?} failed for {}: {}", command, id, e),
                    _ => debug!("{:?} rejected for {}: {}", command, id, e),
                }
                CommandOutcome::failed(e.to_string())
            }
        }
    }

    fn dispatch(&self, id: &str, command: &Command) -> GameResult<String> {
        match command {
            Command::Create(name) => {
                let player = self.create_character(id, name)?;
                Ok(format!(
                    "Character {} created! You have {} status points to allocate.\n\n{}",
                    player.name,
                    player.unallocated_points,
                    render_stats(&player)
                ))
            }
            Command::Stats => self.stats(id),
            Command::Inventory => self.inventory(id),
            Command::Skills => self.skills(id),
            Command::Explore => {
                let session = self.start_encounter(id)?;
                let remaining = self.battles_remaining_today(id)?;
                Ok(format!(
                    "{}\n{}\nWhat will you do? `!attack`, `!skill <number>`, or `!flee`\n({} battles remaining today)",
                    session.log.join("\n"),
                    session.describe(),
                    remaining
                ))
            }
            Command::Attack => self.turn_message(id, PlayerAction::Attack),
            Command::Skill(number) => self.turn_message(id, PlayerAction::Skill(*number)),
            Command::Flee => self.turn_message(id, PlayerAction::Flee),
            Command::AutoBattle => {
                let report = self.auto_battle(id)?;
                Ok(report.log.join("\n"))
            }
            Command::Allocate(allocation) => {
                let player = self.allocate(id, allocation)?;
                Ok(format!(
                    "Points allocated! Remaining points: {}\n\n{}",
                    player.unallocated_points,
                    render_stats(&player)
                ))
            }
            Command::Equip { slot, item } => {
                let equipped = self.equip(id, *slot, item)?;
                Ok(format!("Equipped {} as your {}.", equipped.describe(), slot))
            }
            Command::Use(item) => match self.use_item(id, item)? {
                ItemUse::Field(recovery) => {
                    let player = self.load_player(id)?;
                    let used = CombatEvent::ItemUsed {
                        player: player.name.clone(),
                        recovery,
                    };
                    Ok(format!(
                        "{}\nHP: {}/{} | MP: {}/{}",
                        used, player.current_hp, player.max_hp, player.current_mp, player.max_mp
                    ))
                }
                ItemUse::Battle(turn) => self.render_turn(id, &turn),
            },
            Command::Save => {
                self.save(id)?;
                Ok("Game saved!".to_string())
            }
            Command::Load => {
                let player = self.load(id)?;
                Ok(format!("Loaded {} (Lv. {}).", player.name, player.level))
            }
            Command::Remaining => {
                let remaining = self.battles_remaining_today(id)?;
                Ok(format!("You have {} battles remaining today.", remaining))
            }
            Command::Reset => Ok(format!(
                "Daily battles reset in {}",
                format_duration_secs(self.time_until_reset().num_seconds())
            )),
            Command::Rest => {
                let player = self.rest(id)?;
                Ok(format!(
                    "{} rests and recovers. HP: {}/{} MP: {}/{}",
                    player.name, player.current_hp, player.max_hp, player.current_mp, player.max_mp
                ))
            }
            Command::Delete => {
                self.request_delete(id)?;
                Ok(format!(
                    "Are you sure you want to delete your character? This cannot be undone.\nType `!confirm YES` within {} seconds to confirm.",
                    self.config.confirm_timeout_secs
                ))
            }
            Command::Confirm(answer) => {
                if self.confirm_delete(id, answer)? {
                    Ok("Your character has been deleted.".to_string())
                } else {
                    Ok("Character deletion cancelled.".to_string())
                }
            }
            Command::Help => Ok(render_help()),
        }
    }

    fn turn_message(&self, id: &str, action: PlayerAction) -> GameResult<String> {
        let turn = self.act(id, action)?;
        self.render_turn(id, &turn)
    }

    fn render_turn(&self, id: &str, turn: &BattleTurn) -> GameResult<String> {
        let mut lines = turn.lines();
        if turn.outcome().is_none() {
            let player = self.load_player(id)?;
            lines.push(format!(
                "HP: {}/{} | MP: {}/{}",
                player.current_hp, player.max_hp, player.current_mp, player.max_mp
            ));
            if let Some(session) = self.sessions.get(id) {
                lines.push(session.describe());
            }
        }
        Ok(lines.join("\n"))
    }
}
