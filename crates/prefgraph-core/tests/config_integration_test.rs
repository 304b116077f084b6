use prefgraph_core::{
    Category, Channel, ConfigError, ConfigManager, EngineConfig, Event, OptionIndex, OptionKind,
    PrefGraphConfig, PrefGraphError,
};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_default_configuration() {
    let config = PrefGraphConfig::default();
    assert_eq!(config.engine, EngineConfig::default());
    assert_eq!(config.logging.format, "pretty");
}

#[test]
fn test_config_serialization() {
    let mut config = PrefGraphConfig::default();
    config.engine.strict_hierarchy = true;
    config.engine.key_separator = "/".to_string();

    let toml = config.to_toml().unwrap();
    let from_toml = PrefGraphConfig::from_toml(&toml).unwrap();
    assert_eq!(config, from_toml);
}

#[test]
fn test_config_file_persistence() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("prefgraph.toml");

    let mut config = PrefGraphConfig::default();
    config.engine.strict_hierarchy = true;
    config.to_file(&config_path).unwrap();
    assert!(config_path.exists());

    let manager = ConfigManager::from_file(&config_path).unwrap();
    assert_eq!(manager.config_path(), Some(config_path.as_path()));
    if std::env::var("PREFGRAPH_STRICT_HIERARCHY").is_err() {
        assert!(manager.config().engine.strict_hierarchy);
    }
}

#[test]
fn test_missing_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = ConfigManager::from_file(temp_dir.path().join("nope.toml"));
    assert!(matches!(result, Err(ConfigError::NotFound(_))));
}

#[test]
fn test_invalid_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("bad.toml");
    fs::write(&config_path, "[logging]\nformat = \"xml\"\n").unwrap();

    if std::env::var("PREFGRAPH_LOG_FORMAT").is_err() {
        let result = ConfigManager::from_file(&config_path);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }
}

#[test]
fn test_strict_hierarchy_from_config_rejects_duplicates() {
    let config =
        PrefGraphConfig::from_toml("[engine]\nstrict_hierarchy = true\n").unwrap();
    let categories = vec![
        Category::new("c1", "One", vec![Event::new("a", "A")]),
        Category::new("c2", "Two", vec![Event::new("a", "A")]),
    ];
    let channels = vec![Channel::new("x", "X")];

    let err = OptionIndex::build_with(&categories, &channels, &[], &config.engine).unwrap_err();
    match err {
        PrefGraphError::DuplicateId { kind, id } => {
            assert_eq!(kind, OptionKind::Event);
            assert_eq!(id, "a");
        }
        other => panic!("unexpected error: {other}"),
    }
}
