//! Configuration tests
//!
//! The template written by `to_toml()` must always parse back into the same
//! values, so a field added to `Config` without a serializer shows up here.

use super::*;
use std::collections::HashMap;
use tracing::level_filters::LevelFilter;

fn no_env(_: &str) -> Option<String> {
    None
}

fn parse(toml_str: &str) -> FileConfig {
    toml::from_str(toml_str).expect("config should parse")
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );

    let reloaded = Config::from_sources(parsed.unwrap(), no_env);
    assert_eq!(reloaded.root_group, "GMD - ITG");
    assert_eq!(reloaded.new_group_label, "New group");
    assert_eq!(reloaded.sessions_file, None);
}

#[test]
fn test_config_roundtrip_custom_values() {
    let mut config = Config::default();
    config.root_group = "Team \"Core\"".to_string();
    config.new_group_label = "Folder".to_string();
    config.sessions_file = Some(PathBuf::from("/tmp/sessions.jsonl"));
    config.logging.level = LevelFilter::DEBUG;
    config.logging.file_enabled = true;
    config.logging.file_rotation = LogRotation::Hourly;
    config.logging.file_prefix = "lp".to_string();

    let reloaded = Config::from_sources(parse(&config.to_toml()), no_env);
    assert_eq!(reloaded.root_group, "Team \"Core\"");
    assert_eq!(reloaded.new_group_label, "Folder");
    assert_eq!(
        reloaded.sessions_file,
        Some(PathBuf::from("/tmp/sessions.jsonl"))
    );
    assert_eq!(reloaded.logging.level, LevelFilter::DEBUG);
    assert!(reloaded.logging.file_enabled);
    assert_eq!(reloaded.logging.file_rotation, LogRotation::Hourly);
    assert_eq!(reloaded.logging.file_prefix, "lp");
}

#[test]
fn test_config_roundtrip_control_characters() {
    let mut config = Config::default();
    config.root_group = "Esc\u{1b}ape\nsecond line\\tab\t".to_string();
    config.logging.file_prefix = "lp\u{7f}".to_string();
    config.logging.file_dir = PathBuf::from("C:\\logs\\launchpad");

    let toml_str = config.to_toml();
    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(parsed.is_ok(), "TOML:\n{}\nError: {:?}", toml_str, parsed.err());

    let reloaded = Config::from_sources(parsed.unwrap(), no_env);
    assert_eq!(reloaded.root_group, config.root_group);
    assert_eq!(reloaded.logging.file_prefix, config.logging.file_prefix);
    assert_eq!(reloaded.logging.file_dir, config.logging.file_dir);
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_env_overrides_file() {
    let file = parse(r#"sessions_file = "from-file.jsonl""#);
    let env: HashMap<&str, &str> = [
        ("LAUNCHPAD_SESSIONS", "from-env.jsonl"),
        ("LAUNCHPAD_DEMO", "TRUE"),
    ]
    .into_iter()
    .collect();

    let config = Config::from_sources(file, |key| env.get(key).map(|v| v.to_string()));
    assert_eq!(config.sessions_file, Some(PathBuf::from("from-env.jsonl")));
    assert!(config.demo_mode);
}

#[test]
fn test_file_overrides_defaults() {
    let file = parse(
        r#"
root_group = "Bookmarks"

[logging]
file_rotation = "never"
"#,
    );
    let config = Config::from_sources(file, no_env);
    assert_eq!(config.root_group, "Bookmarks");
    assert_eq!(config.new_group_label, DEFAULT_NEW_GROUP_LABEL);
    assert_eq!(config.logging.file_rotation, LogRotation::Never);
    assert_eq!(config.logging.level, LevelFilter::INFO);
    assert!(!config.demo_mode);
}

#[test]
fn test_blank_new_group_label_falls_back() {
    let config = Config::from_sources(parse(r#"new_group_label = "  ""#), no_env);
    assert_eq!(config.new_group_label, DEFAULT_NEW_GROUP_LABEL);
}

#[test]
fn test_unknown_rotation_defaults_to_daily() {
    assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
    assert_eq!(LogRotation::parse("HOURLY"), LogRotation::Hourly);
}

// ─────────────────────────────────────────────────────────────────────────────
// Broken files
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_unknown_keys_are_rejected() {
    let parsed: Result<FileConfig, _> = toml::from_str("theme = \"dark\"");
    assert!(parsed.is_err());
}

#[test]
fn test_misspelt_level_is_rejected() {
    let parsed: Result<FileConfig, _> = toml::from_str("[logging]\nlevel = \"verbose\"");
    assert!(parsed.is_err());

    let upper = parse("[logging]\nlevel = \"WARN\"");
    assert_eq!(upper.logging.level, LevelFilter::WARN);
}

#[test]
fn test_load_file_config_reports_path() {
    let dir = std::env::temp_dir().join(format!("launchpad-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    std::fs::write(&path, "root_group = ").unwrap();

    let err = Config::load_file_config(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("config.toml"));

    let missing = Config::load_file_config(&dir.join("missing.toml")).unwrap();
    assert!(missing.root_group.is_none());

    std::fs::remove_dir_all(&dir).unwrap();
}
