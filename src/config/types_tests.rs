//! Tests for configuration types

use super::*;
use proptest::prelude::*;

#[test]
fn test_empty_config_uses_defaults() {
    let config: Config = toml::from_str("").unwrap();

    assert_eq!(config.backend.base_url, "http://127.0.0.1:8000/");
    assert!(config.backend.token.is_none());
    assert_eq!(config.suggest.debounce_ms, 300);
    assert_eq!(config.suggest.min_query_len, 2);
    assert_eq!(config.endpoints.college, "api/colleges/autocomplete/");
    assert_eq!(config.endpoints.city, "api/cities/autocomplete/");
    assert_eq!(config.endpoints.program, "api/programs/autocomplete/");
}

#[test]
fn test_full_config_parses() {
    let toml = r#"
[backend]
base_url = "https://campus.example.com/"
token = "abc123"

[suggest]
debounce_ms = 250
min_query_len = 3

[endpoints]
college = "v2/colleges/suggest/"
"#;
    let config: Config = toml::from_str(toml).unwrap();

    assert_eq!(config.backend.base_url, "https://campus.example.com/");
    assert_eq!(config.backend.token.as_deref(), Some("abc123"));
    assert_eq!(config.suggest.debounce_ms, 250);
    assert_eq!(config.suggest.min_query_len, 3);
    assert_eq!(config.endpoints.college, "v2/colleges/suggest/");
    // Unset endpoints keep their defaults
    assert_eq!(config.endpoints.city, "api/cities/autocomplete/");
}

#[test]
fn test_wrong_type_fails_to_parse() {
    let toml = r#"
[suggest]
debounce_ms = "fast"
"#;
    let result: Result<Config, _> = toml::from_str(toml);
    assert!(result.is_err());
}

#[test]
fn test_malformed_toml_fails_to_parse() {
    let result: Result<Config, _> = toml::from_str("[backend\nbase_url = \"x\"");
    assert!(result.is_err(), "Malformed TOML should fail to parse");
}

#[test]
fn test_overrides_replace_file_values() {
    let config = Config::default().with_overrides(
        Some("http://localhost:9000/".to_string()),
        Some("cli-token".to_string()),
    );

    assert_eq!(config.backend.base_url, "http://localhost:9000/");
    assert_eq!(config.backend.token.as_deref(), Some("cli-token"));
}

#[test]
fn test_absent_overrides_keep_file_values() {
    let mut config = Config::default();
    config.backend.token = Some("file-token".to_string());

    let config = config.with_overrides(None, None);
    assert_eq!(config.backend.base_url, "http://127.0.0.1:8000/");
    assert_eq!(config.backend.token.as_deref(), Some("file-token"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_suggest_section_round_trips_values(
        debounce_ms in 0u64..10_000,
        min_query_len in 1usize..10,
    ) {
        let toml_content = format!(r#"
[suggest]
debounce_ms = {}
min_query_len = {}
"#, debounce_ms, min_query_len);

        let config: Config = toml::from_str(&toml_content).unwrap();
        prop_assert_eq!(config.suggest.debounce_ms, debounce_ms);
        prop_assert_eq!(config.suggest.min_query_len, min_query_len);
    }
}
