use docs_chat_widget::config::AppConfig;
use serial_test::serial;
use std::env;
use std::fs;

// Helper to clear environment variables that might interfere with tests
fn clear_env_vars() {
    unsafe {
        env::remove_var("DOCCHAT_SERVER__PORT");
        env::remove_var("DOCCHAT_BACKEND__BASE_URL");
        env::remove_var("DOCCHAT_WIDGET__GREETING");
        env::remove_var("CONFIG_FILE");
        env::remove_var("PORT");
        env::remove_var("BACKEND_URL");
        env::remove_var("SITE_ROOT");
    }
}

// The test harness's own arguments would confuse clap, so every load passes
// an explicit argv.
fn load() -> AppConfig {
    AppConfig::load_from_args(["docs-chat-widget"]).expect("Failed to load config")
}

#[test]
#[serial]
fn test_default_config() {
    clear_env_vars();

    let config = load();
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(
        config.backend.endpoint(),
        "https://ai-assisted-book.onrender.com//api/query-global"
    );
    assert_eq!(config.widget.title, "Ask the Book");
    assert_eq!(
        config.widget.greeting,
        "Hello! I'm your book assistant. Ask me anything about this book."
    );
    assert_eq!(config.site.root, "build");
    assert_eq!(config.site.static_dir, "static");
    assert!(config.widget.htmx_src.starts_with("https://"));
    assert!(config.widget.alpine_src.starts_with("https://"));
}

#[test]
#[serial]
fn test_env_override() {
    clear_env_vars();
    unsafe {
        env::set_var("DOCCHAT_SERVER__PORT", "9090");
        env::set_var("DOCCHAT_WIDGET__GREETING", "Ask away.");
    }

    let config = load();
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.widget.greeting, "Ask away.");

    clear_env_vars();
}

#[test]
#[serial]
fn test_cli_env_beats_prefixed_env() {
    clear_env_vars();
    unsafe {
        env::set_var("DOCCHAT_BACKEND__BASE_URL", "http://from-prefixed:8000");
        env::set_var("BACKEND_URL", "http://from-cli-env:8000");
    }

    let config = load();
    assert_eq!(config.backend.base_url, "http://from-cli-env:8000");

    clear_env_vars();
}

#[test]
#[serial]
fn test_file_load() {
    clear_env_vars();

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let file_path = dir.path().join("widget.yaml");
    let config_content = r#"
server:
  port: 7070
backend:
  base_url: "http://localhost:8000"
widget:
  poll_interval_ms: 250
"#;
    fs::write(&file_path, config_content).expect("Failed to write temp config");

    unsafe {
        env::set_var("CONFIG_FILE", &file_path);
    }

    let config = load();
    assert_eq!(config.server.port, 7070);
    assert_eq!(
        config.backend.endpoint(),
        "http://localhost:8000/api/query-global"
    );
    assert_eq!(config.widget.poll_interval_ms, 250);
    // Untouched keys keep their defaults
    assert_eq!(config.widget.title, "Ask the Book");

    clear_env_vars();
}

#[test]
#[serial]
fn test_missing_config_file_is_error() {
    clear_env_vars();

    let result = AppConfig::load_from_args(["docs-chat-widget", "--config", "does/not/exist.yaml"]);
    assert!(result.is_err());
}
