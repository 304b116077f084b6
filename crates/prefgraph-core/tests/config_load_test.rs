//! `ConfigManager::load` reads the working directory, `$HOME` and the
//! process environment, so it lives in its own test binary with a single
//! test.

use prefgraph_core::{
    Category, Channel, ConfigError, ConfigManager, Event, OptionKind, PreferenceSession,
    PrefGraphError,
};
use std::env;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const OVERRIDES: &[&str] = &[
    "RUST_LOG",
    "PREFGRAPH_KEY_SEPARATOR",
    "PREFGRAPH_STRICT_HIERARCHY",
    "PREFGRAPH_LOG_LEVEL",
    "PREFGRAPH_LOG_FORMAT",
];

fn duplicated_hierarchy() -> (Vec<Category>, Vec<Channel>) {
    let categories = vec![
        Category::new("c1", "One", vec![Event::new("a", "A")]),
        Category::new("c2", "Two", vec![Event::new("a", "A")]),
    ];
    (categories, vec![Channel::new("x", "X")])
}

#[test]
fn test_load_search_order_and_env_overrides() {
    for var in OVERRIDES {
        env::remove_var(var);
    }
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    env::set_var("HOME", home.path());
    env::set_current_dir(work.path()).unwrap();

    // nothing on disk: defaults
    let manager = ConfigManager::load().unwrap();
    assert!(manager.config_path().is_none());
    assert_eq!(manager.config().engine.key_separator, "__");

    // user config under ~/.prefgraph
    let user_dir = home.path().join(".prefgraph");
    fs::create_dir_all(&user_dir).unwrap();
    fs::write(
        user_dir.join("config.toml"),
        "[engine]\nstrict_hierarchy = true\n\n[logging]\nlevel = \"info\"\n",
    )
    .unwrap();
    let manager = ConfigManager::load().unwrap();
    assert_eq!(manager.config_path(), Some(user_dir.join("config.toml").as_path()));
    assert!(manager.config().engine.strict_hierarchy);
    assert_eq!(manager.config().logging.level, "info");

    // the engine section reaches sessions built from the loaded config
    let (categories, channels) = duplicated_hierarchy();
    match PreferenceSession::configured(&categories, &channels, &[]) {
        Err(PrefGraphError::DuplicateId { kind, id }) => {
            assert_eq!(kind, OptionKind::Event);
            assert_eq!(id, "a");
        }
        other => panic!("expected a duplicate id error, got {:?}", other.map(|_| ())),
    }

    // a local file wins over the user config
    fs::write(".prefgraph.toml", "[engine]\nkey_separator = \"::\"\n").unwrap();
    let manager = ConfigManager::load().unwrap();
    assert_eq!(manager.config_path(), Some(Path::new(".prefgraph.toml")));
    assert_eq!(manager.config().engine.key_separator, "::");
    assert!(!manager.config().engine.strict_hierarchy);

    // environment overrides file values, PREFGRAPH_LOG_LEVEL over RUST_LOG
    env::set_var("PREFGRAPH_KEY_SEPARATOR", "/");
    env::set_var("PREFGRAPH_STRICT_HIERARCHY", "TRUE");
    env::set_var("RUST_LOG", "info");
    env::set_var("PREFGRAPH_LOG_LEVEL", "prefgraph_core=debug");
    env::set_var("PREFGRAPH_LOG_FORMAT", "compact");
    let config = ConfigManager::load().unwrap().into_config();
    assert_eq!(config.engine.key_separator, "/");
    assert!(config.engine.strict_hierarchy);
    assert_eq!(config.logging.level, "prefgraph_core=debug");
    assert_eq!(config.logging.format, "compact");

    // invalid values surface through the crate error
    env::set_var("PREFGRAPH_LOG_FORMAT", "xml");
    assert!(matches!(
        ConfigManager::load(),
        Err(ConfigError::ValidationError(_))
    ));
    let (categories, channels) = duplicated_hierarchy();
    assert!(matches!(
        PreferenceSession::configured(&categories, &channels, &[]),
        Err(PrefGraphError::Config(ConfigError::ValidationError(_)))
    ));

    for var in OVERRIDES {
        env::remove_var(var);
    }
}
