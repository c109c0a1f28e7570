use ridepro_cli::config::Config;
use tempfile::TempDir;
use uuid::Uuid;

// Kept in its own test binary so the env override cannot race other tests.
#[test]
fn test_config_round_trip_in_isolated_dir() {
    let dir = TempDir::new().unwrap();
    std::env::set_var("RIDEPRO_CONFIG_DIR", dir.path());

    // Nothing on disk yet: load falls back to defaults
    let config = Config::load().unwrap();
    assert_eq!(config.api.base_url, "https://api.ridepro.io");

    let mut config = Config::default();
    config.auth.token = "test-token".to_string();
    config.athlete.default_athlete_id = Some(Uuid::new_v4());
    config.save().unwrap();

    assert!(dir.path().join("config.toml").exists());

    let loaded = Config::load().unwrap();
    assert_eq!(loaded.auth.token, "test-token");
    assert_eq!(
        loaded.athlete.default_athlete_id,
        config.athlete.default_athlete_id
    );
    assert!(loaded.is_authenticated());

    std::env::remove_var("RIDEPRO_CONFIG_DIR");
}
