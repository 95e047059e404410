use term_pad_config::AppConfig;

#[test]
fn test_load_creates_default_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("term-pad.json");
    assert!(!path.exists());

    let config = AppConfig::load_or_create(&path);
    assert!(path.exists());
    assert_eq!(config, AppConfig::default());

    // File should contain valid JSON
    let contents = std::fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert!(parsed.is_object());
}

#[test]
fn test_load_creates_missing_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("term-pad.json");

    AppConfig::load_or_create(&path);
    assert!(path.exists());
}

#[test]
fn test_load_existing_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("term-pad.json");
    let json = r#"{
        "tab_width": 8,
        "undo_cache_size": 3,
        "max_history_depth": 200,
        "status_message_secs": 2,
        "show_status_line": false
    }"#;
    std::fs::write(&path, json).unwrap();

    let config = AppConfig::load_or_create(&path);
    assert_eq!(config.tab_width, 8);
    assert_eq!(config.undo_cache_size, 3);
    assert_eq!(config.max_history_depth, 200);
    assert_eq!(config.status_message_secs, 2);
    assert!(!config.show_status_line);
}

#[test]
fn test_broken_json_returns_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("term-pad.json");
    std::fs::write(&path, "{ this is not valid json }}}").unwrap();

    let config = AppConfig::load_or_create(&path);
    assert_eq!(config, AppConfig::default());

    // Broken file is left alone
    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "{ this is not valid json }}}");
}

#[test]
fn test_partial_config_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("term-pad.json");
    std::fs::write(&path, r#"{"tab_width": 2}"#).unwrap();

    let config = AppConfig::load_or_create(&path);
    assert_eq!(config.tab_width, 2);
    assert_eq!(config.undo_cache_size, 10);
    assert!(config.show_status_line);
}

#[test]
fn test_load_sanitizes_out_of_range_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("term-pad.json");
    std::fs::write(&path, r#"{"tab_width": 0, "undo_cache_size": 0}"#).unwrap();

    let config = AppConfig::load_or_create(&path);
    assert_eq!(config.tab_width, 1);
    assert_eq!(config.undo_cache_size, 1);
}

#[test]
fn test_save_then_load_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("term-pad.json");
    let config = AppConfig {
        tab_width: 3,
        ..AppConfig::default()
    };
    config.save(&path).unwrap();

    let loaded = AppConfig::load_or_create(&path);
    assert_eq!(loaded, config);
}
