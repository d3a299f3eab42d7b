#![cfg(feature = "loaders")]

mod common;

use std::fs;

use common::{Level, Log};
use game_movement::env::{DoorState, MapOracle, TerrainKind};
use game_movement::loaders::{ConfigLoader, MapLoader};
use game_movement::{ActorKind, ActorState, EntityId, MovementConfig, Position};
use tempfile::TempDir;

#[test]
fn loaded_quantum_drives_the_schedule() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("movement.toml");
    fs::write(
        &path,
        "# twice as fast as usual\nquantum = 6\ncrowd_threshold = 5\npeaceful_notice_odds = 3\n",
    )
    .expect("write config");

    let config = ConfigLoader::load(&path).expect("valid config");
    assert_eq!(config.quantum, 6);
    assert_eq!(config.crowd_threshold, 5);
    assert_eq!(config.peaceful_notice_odds, 3);
    assert_eq!(config.leash_tether, MovementConfig::DEFAULT_LEASH_TETHER);

    let mut level = Level::room(12, 3, 5, Position::new(11, 1));
    level.config = config;
    let id = level.add(ActorState::new(EntityId(1), Position::new(0, 1), ActorKind::default()));
    let mut log = Log::default();
    assert_eq!(level.run_turn(&mut log).actions_by(id), 2);
}

#[test]
fn config_errors_name_the_problem() {
    let dir = TempDir::new().expect("temp dir");

    let missing = ConfigLoader::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(missing.to_string().contains("Failed to read file"));

    let path = dir.path().join("bad.toml");
    fs::write(&path, "quantum = \"fast\"\n").expect("write config");
    let malformed = ConfigLoader::load(&path).unwrap_err();
    assert!(malformed.to_string().contains("Failed to parse movement config TOML"));

    fs::write(&path, "quantum = 0\n").expect("write config");
    assert!(ConfigLoader::load(&path).is_err());
}

#[test]
fn map_file_round_trips_through_the_legend() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("level.txt");
    fs::write(&path, "|||||\n|.+.|\n|||||\n\n\n").expect("write map");

    let map = MapLoader::load(&path).expect("valid layout");
    assert_eq!(map.dimensions().width, 5);
    assert_eq!(map.dimensions().height, 3);
    let door = map.tile(Position::new(2, 1)).expect("on map").terrain();
    assert!(matches!(
        door,
        TerrainKind::Doorway(door) if door.state == DoorState::Closed
    ));
}

#[test]
fn ragged_map_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("ragged.txt");
    fs::write(&path, "|||||\n|..|\n").expect("write map");

    let error = MapLoader::load(&path).unwrap_err();
    assert!(error.to_string().contains("Failed to parse map layout"));
}
