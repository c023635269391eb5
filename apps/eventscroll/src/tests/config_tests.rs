use std::collections::HashMap;

use super::*;

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_without_file_or_env() {
    let settings = layer_settings(None, env_of(&[])).expect("settings");
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.page_limit, 50);
}

#[test]
fn file_overrides_defaults_and_env_overrides_file() {
    let file = r#"
        server_url = "https://events.example/api"
        page_limit = 25
    "#;
    let from_file = layer_settings(Some(file), env_of(&[])).expect("file");
    assert_eq!(from_file.server_url, "https://events.example/api");
    assert_eq!(from_file.page_limit, 25);

    let from_env = layer_settings(
        Some(file),
        env_of(&[
            ("EVENTSCROLL_SERVER_URL", "http://a.example"),
            ("APP__SERVER_URL", "http://b.example"),
            ("APP__PAGE_LIMIT", "10"),
        ]),
    )
    .expect("env");
    assert_eq!(from_env.server_url, "http://b.example");
    assert_eq!(from_env.page_limit, 10);
}

#[test]
fn rejects_non_numeric_page_limit() {
    assert!(layer_settings(None, env_of(&[("APP__PAGE_LIMIT", "lots")])).is_err());
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let path = std::env::temp_dir().join("eventscroll_settings_that_do_not_exist.toml");
    let settings = load_settings(&path).expect("settings");
    assert!(!settings.server_url.is_empty());
}

#[test]
fn validates_server_url_scheme() {
    assert_eq!(
        validate_server_url("http://localhost:8000/api/").expect("url"),
        "http://localhost:8000/api"
    );
    assert!(validate_server_url("localhost:8000").is_err());
    assert!(validate_server_url("ftp://files.example").is_err());
}
