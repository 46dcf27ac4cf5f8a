//! Integration tests for layered settings loading.
//!
//! These tests pass an explicit config file to `Settings::load_from`, so no
//! global config on the test machine is read.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use animal_game::application::ApplicationError;
use animal_game::config::Settings;

#[test]
fn given_no_config_file_when_load_then_defaults() {
    let temp = TempDir::new().unwrap();

    let settings = Settings::load_from(Some(temp.path().join("missing.toml").as_path())).unwrap();

    assert_eq!(settings.seed_animal, "cat");
    assert!(settings.intro);
}

#[test]
fn given_config_file_when_load_then_overrides_only_given_fields() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("animal-game.toml");
    fs::write(&config, "seed_animal = \"dog\"\nintro = false\n").unwrap();

    let settings = Settings::load_from(Some(config.as_path())).unwrap();

    assert_eq!(settings.seed_animal, "dog");
    assert!(!settings.intro);
    assert_eq!(settings.knowledge_file, Settings::default().knowledge_file);
}

#[test]
fn given_knowledge_file_with_home_when_load_then_expanded() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("animal-game.toml");
    fs::write(&config, "knowledge_file = \"$HOME/animals.txt\"\n").unwrap();

    let settings = Settings::load_from(Some(config.as_path())).unwrap();

    let path = settings.knowledge_file.to_string_lossy().to_string();
    assert!(!path.contains("$HOME"), "unexpanded: {path}");
    assert!(settings.knowledge_file.ends_with("animals.txt"));
}

#[test]
fn given_invalid_toml_when_load_then_config_error() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("animal-game.toml");
    fs::write(&config, "seed_animal = [unterminated\n").unwrap();

    let err = Settings::load_from(Some(config.as_path())).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }), "got {err:?}");
}

#[test]
fn given_cli_file_when_applied_then_wins_over_config_file() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("animal-game.toml");
    fs::write(&config, "knowledge_file = \"/from/config.txt\"\n").unwrap();

    let settings = Settings::load_from(Some(config.as_path()))
        .unwrap()
        .with_knowledge_file(Some(PathBuf::from("/from/cli.txt")));

    assert_eq!(settings.knowledge_file, PathBuf::from("/from/cli.txt"));
}

#[test]
fn given_template_when_written_and_loaded_then_defaults() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("animal-game.toml");
    fs::write(&config, Settings::template()).unwrap();

    let settings = Settings::load_from(Some(config.as_path())).unwrap();

    assert_eq!(settings.seed_animal, "cat");
    assert!(settings.intro);
}
