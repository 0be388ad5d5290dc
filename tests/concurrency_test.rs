//! Integration test: one command per player at a time
//!
//! A command arriving while another for the same player is still running is
//! rejected; different players proceed independently across threads.

use battlebot::character::MemoryPlayerStore;
use battlebot::commands::{Command, GameService};
use battlebot::core::{GameConfig, GameError};
use std::sync::Arc;
use std::thread;

fn service() -> GameService {
    GameService::new(GameConfig::default(), Box::new(MemoryPlayerStore::new())).with_seed(1)
}

#[test]
fn test_second_command_while_busy_is_rejected() {
    let svc = service();
    svc.create_character("p1", "Aria").unwrap();

    let guard = svc.sessions().acquire("p1").unwrap();
    let err = svc.start_encounter("p1").unwrap_err();
    assert!(matches!(err, GameError::Busy(_)));
    let outcome = svc.execute("p1", &Command::Stats);
    assert!(!outcome.success);
    assert!(outcome.message.contains("already in progress"));

    // other players are not blocked
    svc.create_character("p2", "Brom").unwrap();
    assert!(svc.start_encounter("p2").is_ok());

    drop(guard);
    assert!(svc.start_encounter("p1").is_ok());
    assert!(!svc.sessions().is_busy("p1"));
}

#[test]
fn test_marker_released_after_failed_command() {
    let svc = service();
    svc.create_character("p1", "Aria").unwrap();
    assert!(svc.attack("p1").is_err());
    assert!(!svc.sessions().is_busy("p1"));
    assert!(svc.start_encounter("p1").is_ok());
}

#[test]
fn test_players_battle_in_parallel() {
    let svc = Arc::new(service());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let svc = Arc::clone(&svc);
            thread::spawn(move || {
                let id = format!("player-{i}");
                svc.create_character(&id, &format!("Hero {i}")).unwrap();
                svc.auto_battle(&id).unwrap()
            })
        })
        .collect();

    for handle in handles {
        let report = handle.join().expect("battle thread");
        assert!(!report.log.is_empty());
    }
    assert!(svc.sessions().is_empty());
    for i in 0..8 {
        let player = svc.player(&format!("player-{i}")).unwrap();
        assert_eq!(player.total_battles, 1);
        assert!(player.current_hp >= 1);
    }
}
