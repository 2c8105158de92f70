use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated with valid defaults.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("VITRINE_SOURCE_ORIGIN", "https://loja.example.com.br");
    m
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("unknown").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "VITRINE_ENV"));
}

#[test]
fn build_app_config_fails_without_source_origin() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "VITRINE_SOURCE_ORIGIN"),
        "expected MissingEnvVar(VITRINE_SOURCE_ORIGIN), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_source_origin_as_missing() {
    let mut map = HashMap::new();
    map.insert("VITRINE_SOURCE_ORIGIN", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
}

#[test]
fn build_app_config_rejects_relative_source_origin() {
    let mut map = HashMap::new();
    map.insert("VITRINE_SOURCE_ORIGIN", "loja.example.com.br");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VITRINE_SOURCE_ORIGIN"),
        "expected InvalidEnvVar(VITRINE_SOURCE_ORIGIN), got: {result:?}"
    );
}

#[test]
fn build_app_config_strips_trailing_slash_from_origin() {
    let mut map = HashMap::new();
    map.insert("VITRINE_SOURCE_ORIGIN", "https://loja.example.com.br/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.source_origin, "https://loja.example.com.br");
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = full_env();
    map.insert("VITRINE_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VITRINE_BIND_ADDR"),
        "expected InvalidEnvVar(VITRINE_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_succeeds_with_all_required_vars() {
    let map = full_env();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.source_origin, "https://loja.example.com.br");
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(
        cfg.sources_path,
        std::path::PathBuf::from("./config/sources.yaml")
    );
    assert!(cfg.api_keys.is_empty());
    assert_eq!(cfg.scraper_request_timeout_secs, 30);
    assert_eq!(cfg.scraper_user_agent, DEFAULT_USER_AGENT);
    assert_eq!(cfg.scraper_max_in_flight, 4);
    assert_eq!(cfg.image_scan_radius, 1500);
}

#[test]
fn api_keys_are_split_and_trimmed() {
    let mut map = full_env();
    map.insert("VITRINE_API_KEYS", " key-a, ,key-b ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_keys, vec!["key-a".to_string(), "key-b".to_string()]);
}

#[test]
fn scraper_request_timeout_secs_override() {
    let mut map = full_env();
    map.insert("VITRINE_SCRAPER_REQUEST_TIMEOUT_SECS", "60");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.scraper_request_timeout_secs, 60);
}

#[test]
fn scraper_request_timeout_secs_zero_is_rejected() {
    let mut map = full_env();
    map.insert("VITRINE_SCRAPER_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VITRINE_SCRAPER_REQUEST_TIMEOUT_SECS")
    );
}

#[test]
fn scraper_request_timeout_secs_invalid() {
    let mut map = full_env();
    map.insert("VITRINE_SCRAPER_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VITRINE_SCRAPER_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(VITRINE_SCRAPER_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn scraper_user_agent_override() {
    let mut map = full_env();
    map.insert("VITRINE_SCRAPER_USER_AGENT", "custom-agent/2.0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.scraper_user_agent, "custom-agent/2.0");
}

#[test]
fn scraper_max_in_flight_override() {
    let mut map = full_env();
    map.insert("VITRINE_SCRAPER_MAX_IN_FLIGHT", "2");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.scraper_max_in_flight, 2);
}

#[test]
fn scraper_max_in_flight_above_cap_is_rejected() {
    let mut map = full_env();
    map.insert("VITRINE_SCRAPER_MAX_IN_FLIGHT", "12");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VITRINE_SCRAPER_MAX_IN_FLIGHT"),
        "expected InvalidEnvVar(VITRINE_SCRAPER_MAX_IN_FLIGHT), got: {result:?}"
    );
}

#[test]
fn scraper_max_in_flight_zero_is_rejected() {
    let mut map = full_env();
    map.insert("VITRINE_SCRAPER_MAX_IN_FLIGHT", "0");
    assert!(build_app_config(lookup_from_map(&map)).is_err());
}

#[test]
fn image_scan_radius_override() {
    let mut map = full_env();
    map.insert("VITRINE_IMAGE_SCAN_RADIUS", "800");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.image_scan_radius, 800);
}

#[test]
fn image_scan_radius_invalid() {
    let mut map = full_env();
    map.insert("VITRINE_IMAGE_SCAN_RADIUS", "-5");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VITRINE_IMAGE_SCAN_RADIUS")
    );
}

#[test]
fn debug_output_redacts_api_keys() {
    let mut map = full_env();
    map.insert("VITRINE_API_KEYS", "super-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("super-secret"));
    assert!(rendered.contains("1 redacted"));
}
