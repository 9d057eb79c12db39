//! Integration tests for config load/save and path resolution.

use graphmind_client::config::{self, ConfigSource};
use graphmind_client::{Config, ConfigError, DEFAULT_BACKEND_URL};
use predicates::prelude::*;

#[test]
fn load_existing_yaml_config() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.yaml");
    std::fs::write(
        &config_path,
        r#"
backend:
  base_url: "http://graphmind.example:8000"
display:
  hyperlinks: false
  banner: false
"#,
    )
    .unwrap();

    let cfg = config::load(&config_path).expect("load should succeed");
    assert_eq!(
        cfg.backend.base_url.as_deref(),
        Some("http://graphmind.example:8000")
    );
    assert_eq!(cfg.backend_url(), "http://graphmind.example:8000");
    assert!(!cfg.hyperlinks_enabled());
    assert!(!cfg.banner_enabled());
}

#[test]
fn partial_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.yaml");
    std::fs::write(&config_path, "display:\n  banner: false\n").unwrap();

    let cfg = config::load(&config_path).expect("load should succeed");
    assert_eq!(cfg.backend_url(), DEFAULT_BACKEND_URL);
    assert!(cfg.hyperlinks_enabled());
    assert!(!cfg.banner_enabled());
}

#[test]
fn invalid_yaml_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.yaml");
    std::fs::write(&config_path, "backend: [not, a, map").unwrap();

    let err = config::load(&config_path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }), "got {err:?}");
    let pred = predicates::str::contains("config.yaml");
    assert!(pred.eval(&err.to_string()), "error should name the file");
}

#[test]
fn save_creates_directory_and_file_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let config_dir = dir.path().join("graphmind");
    let config_path = config_dir.join("config.yaml");
    assert!(!config_dir.exists(), "config dir should not exist yet");

    let mut config = Config::default();
    config.backend.base_url = Some("http://localhost:9000".into());
    config.display.hyperlinks = Some(false);

    config::save(&config_path, &config).expect("save should succeed");
    let pred = predicates::path::exists();
    assert!(
        pred.eval(&config_path),
        "config file should exist after save"
    );

    let contents = std::fs::read_to_string(&config_path).unwrap();
    let pred = predicates::str::contains("backend:").and(predicates::str::contains("base_url"));
    assert!(pred.eval(&contents), "saved file should contain backend.base_url");
    let pred = predicates::str::contains("banner");
    assert!(!pred.eval(&contents), "unset fields are not written");

    let reloaded = config::load(&config_path).expect("reload should succeed");
    assert_eq!(reloaded, config);
}

/// Config path resolves to `~/.graphmind/config.yaml` using the current platform's home dir.
/// We override the HOME env var to a temp dir to verify the resolution.
#[test]
fn default_config_path_uses_home_directory() {
    let dir = tempfile::tempdir().unwrap();
    let home = dir.path().to_str().unwrap().to_string();

    let key = if cfg!(windows) { "USERPROFILE" } else { "HOME" };
    let original = std::env::var(key).ok();

    std::env::set_var(key, &home);
    let path = config::default_config_path();
    let source = config::resolve_config_source(None, None);
    match original {
        Some(v) => std::env::set_var(key, v),
        None => std::env::remove_var(key),
    }

    let expected = dir.path().join(".graphmind").join("config.yaml");
    assert_eq!(path.expect("should resolve a config path"), expected);
    assert_eq!(source, ConfigSource::Default(expected));
    // Nothing exists there yet: defaults, not an error.
    assert_eq!(config::load_from(&source).unwrap(), Config::default());
}
