//! Integration test: JSON save files
//!
//! Round-trips player records through `JsonPlayerStore`, across service
//! restarts, and covers the confirmed delete flow.

use battlebot::character::{JsonPlayerStore, Player, PlayerStore};
use battlebot::combat::BattleOutcome;
use battlebot::commands::{Command, GameService};
use battlebot::core::{Clock, GameConfig, GameError};
use battlebot::items::EquipmentSlot;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

fn temp_dir() -> PathBuf {
    let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    std::env::temp_dir().join(format!(
        "battlebot-persistence-test-{}-{}",
        std::process::id(),
        id
    ))
}

#[derive(Clone)]
struct ManualClock(Arc<Mutex<NaiveDateTime>>);

impl ManualClock {
    fn new() -> Self {
        let time = NaiveDate::from_ymd_opt(2025, 2, 10)
            .and_then(|d| d.and_hms_opt(15, 0, 0))
            .unwrap();
        Self(Arc::new(Mutex::new(time)))
    }

    fn advance(&self, by: Duration) {
        *self.0.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        *self.0.lock().unwrap()
    }
}

fn open(dir: &PathBuf) -> GameService {
    let config = GameConfig {
        save_dir: dir.clone(),
        ..GameConfig::default()
    };
    GameService::open(config).unwrap().with_seed(5)
}

// =========================================================================
// Round trips
// =========================================================================

#[test]
fn test_record_survives_restart() {
    let dir = temp_dir();
    let before = {
        let svc = open(&dir);
        svc.create_character("42", "Aria").unwrap();
        svc.auto_battle("42").unwrap();
        svc.save("42").unwrap();
        svc.player("42").unwrap()
    };

    let svc = open(&dir);
    let after = svc.player("42").unwrap();
    assert_eq!(after, before);
    assert_eq!(after.daily.battles_today, 1);
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_store_roundtrip_of_played_character() {
    let dir = temp_dir();
    let store = JsonPlayerStore::new(&dir).unwrap();
    let mut player = Player::new("7", "Brom", 3);
    player.inventory.add_item("Goblin Sword", 1, 20).unwrap();
    player.inventory.add_item("Monster Essence", 9, 20).unwrap();
    player.equip(EquipmentSlot::Weapon, "Goblin Sword", 20).unwrap();
    player.gold = 77;
    player.kills = 3;

    store.save(&player).unwrap();
    assert!(store.path_for("7").exists());
    assert_eq!(store.load("7").unwrap(), player);
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_battle_end_is_written_immediately() {
    let dir = temp_dir();
    let mut config = GameConfig {
        save_dir: dir.clone(),
        ..GameConfig::default()
    };
    config.combat.flee_chance = 1.0;
    let svc = GameService::open(config).unwrap();
    svc.create_character("42", "Aria").unwrap();
    svc.start_encounter("42").unwrap();
    let turn = svc.flee("42").unwrap();
    assert_eq!(turn.outcome(), Some(BattleOutcome::Fled));

    let on_disk = JsonPlayerStore::new(&dir).unwrap().load("42").unwrap();
    assert_eq!(on_disk, svc.player("42").unwrap());
    assert_eq!(on_disk.total_battles, 1);
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_load_without_save_is_not_found() {
    let dir = temp_dir();
    let svc = open(&dir);
    let err = svc.load("nobody").unwrap_err();
    assert!(matches!(err, GameError::NotFound(_)));
    let outcome = svc.execute("nobody", &Command::Stats);
    assert!(!outcome.success);
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_corrupt_file_is_reported() {
    let dir = temp_dir();
    let svc = open(&dir);
    std::fs::write(dir.join("bad.json"), "{\"id\": 3").unwrap();
    let err = svc.player("bad").unwrap_err();
    assert!(matches!(err, GameError::Json(_)));
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_similar_ids_keep_separate_records() {
    let dir = temp_dir();
    let svc = open(&dir);
    svc.create_character("alice.1", "Alice").unwrap();
    svc.create_character("alice_1", "Bob").unwrap();
    svc.auto_battle("alice_1").unwrap();

    let svc = open(&dir);
    assert_eq!(svc.player("alice.1").unwrap().name, "Alice");
    assert_eq!(svc.player("alice.1").unwrap().total_battles, 0);
    assert_eq!(svc.player("alice_1").unwrap().name, "Bob");
    assert_eq!(svc.player("alice_1").unwrap().total_battles, 1);
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_misplaced_record_is_rejected() {
    let dir = temp_dir();
    let svc = open(&dir);
    svc.create_character("9", "Aria").unwrap();
    let store = JsonPlayerStore::new(&dir).unwrap();
    std::fs::copy(store.path_for("9"), store.path_for("10")).unwrap();

    let err = svc.player("10").unwrap_err();
    assert!(matches!(err, GameError::Io(_)));
    assert!(svc.create_character("10", "Brom").is_err());
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_potion_use_is_saved() {
    let dir = temp_dir();
    {
        let svc = open(&dir);
        let store = JsonPlayerStore::new(&dir).unwrap();
        let mut player = svc.create_character("42", "Aria").unwrap();
        player.current_hp = 10;
        player.current_mp = 0;
        player.inventory.add_item("Elixir", 2, 20).unwrap();
        store.save(&player).unwrap();

        let outcome = svc.execute_line("42", "!use elixir");
        assert!(outcome.success, "{}", outcome.message);
        assert!(outcome.message.contains("recovers 90 HP and 23 MP"));
    }

    let svc = open(&dir);
    let player = svc.player("42").unwrap();
    assert_eq!(player.current_hp, player.max_hp);
    assert_eq!(player.current_mp, player.max_mp);
    assert_eq!(player.inventory.count("Elixir"), 1);
    std::fs::remove_dir_all(&dir).ok();
}

// =========================================================================
// Delete with confirmation
// =========================================================================

fn delete_service(dir: &PathBuf, clock: &ManualClock) -> GameService {
    open(dir).with_clock(clock.clone())
}

#[test]
fn test_confirmed_delete_removes_record() {
    let dir = temp_dir();
    let clock = ManualClock::new();
    let svc = delete_service(&dir, &clock);
    svc.create_character("42", "Aria").unwrap();

    let asked = svc.execute("42", &Command::Delete);
    assert!(asked.success);
    assert!(asked.message.contains("!confirm YES"));
    clock.advance(Duration::seconds(10));
    assert!(svc.confirm_delete("42", "YES").unwrap());

    assert!(!JsonPlayerStore::new(&dir).unwrap().exists("42"));
    assert!(matches!(svc.player("42"), Err(GameError::NotFound(_))));
    // a fresh character can be made afterwards
    svc.create_character("42", "Aria II").unwrap();
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_late_confirmation_is_cancelled() {
    let dir = temp_dir();
    let clock = ManualClock::new();
    let svc = delete_service(&dir, &clock);
    svc.create_character("42", "Aria").unwrap();
    svc.request_delete("42").unwrap();
    clock.advance(Duration::seconds(31));

    let err = svc.confirm_delete("42", "YES").unwrap_err();
    assert!(matches!(err, GameError::InvalidState(_)));
    assert!(svc.player("42").is_ok());
    // the request is gone, not waiting for another answer
    assert!(svc.confirm_delete("42", "YES").is_err());
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_other_answer_cancels_delete() {
    let dir = temp_dir();
    let clock = ManualClock::new();
    let svc = delete_service(&dir, &clock);
    svc.create_character("42", "Aria").unwrap();
    svc.request_delete("42").unwrap();

    let outcome = svc.execute_line("42", "!confirm no");
    assert!(outcome.success);
    assert_eq!(outcome.message, "Character deletion cancelled.");
    assert!(svc.player("42").is_ok());
    std::fs::remove_dir_all(&dir).ok();
}
