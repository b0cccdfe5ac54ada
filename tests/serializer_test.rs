//! YAML Serializer Integration Tests
//!
//! Tests for parsing and generating configuration text:
//! - Round-trip of valid configurations
//! - Syntax errors vs. validation errors
//! - Output layout (order, indentation, no aliases)

mod common;

use common::VALID_APP_YML;
use nfd_config::{
    default_config, default_proxy_config, generate_yaml_config, merge_config, parse_yaml_config,
};
use serde_json::{Value, json};

// =============================================================================
// Round-Trip
// =============================================================================

#[test]
fn test_default_config_round_trip() {
    let config = default_config();

    let outcome = parse_yaml_config(&generate_yaml_config(&config).unwrap());

    assert!(outcome.success);
    assert!(outcome.errors.is_empty());
    assert_eq!(outcome.config, Some(config));
}

#[test]
fn test_modified_config_round_trip() {
    let config = merge_config(
        &default_config(),
        &json!({
            "server": { "port": 65535, "contextPath": "/nfd" },
            "custom": { "ignoresReg": ["a", "true", "123", "x: y", "# not a comment"] },
            "cache": { "duration": { "ye": -1, "le": 2879.5 } },
            "proxy": ["127.0.0.1:7890"]
        }),
    );

    let outcome = parse_yaml_config(&generate_yaml_config(&config).unwrap());

    assert!(outcome.success);
    assert_eq!(outcome.config, Some(config));
}

#[test]
fn test_round_trip_keeps_key_order() {
    let config = default_config();

    let parsed = parse_yaml_config(&generate_yaml_config(&config).unwrap())
        .config
        .unwrap();

    let keys = |v: &Value| -> Vec<String> { v["cache"]["duration"].as_object().unwrap().keys().cloned().collect() };
    assert_eq!(keys(&parsed), keys(&config));
}

#[test]
fn test_proxy_template_round_trip() {
    let proxy = default_proxy_config();
    let yaml = generate_yaml_config(&proxy).unwrap();

    let parsed: Value = serde_yaml::from_str(&yaml).unwrap();

    assert_eq!(parsed, proxy);
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn test_parse_hand_written_file() {
    let outcome = parse_yaml_config(VALID_APP_YML);

    assert!(outcome.success, "errors: {:?}", outcome.errors);
    let config = outcome.config.unwrap();
    assert_eq!(config["server"]["port"], 6400);
    assert_eq!(config["dataSource"]["password"], "123456");
}

#[test]
fn test_parse_syntax_error() {
    let outcome = parse_yaml_config("server:\n  port: [6400\n  contextPath: /\n");

    assert!(!outcome.success);
    assert!(outcome.config.is_none());
    assert_eq!(outcome.errors.len(), 1);
    assert!(outcome.errors[0].starts_with("YAML parsing error: "));
}

#[test]
fn test_parse_duplicate_key_is_syntax_error() {
    let outcome = parse_yaml_config("server:\n  port: 6400\n  port: 7000\n");

    assert!(!outcome.success);
    assert!(outcome.config.is_none());
    assert_eq!(outcome.errors.len(), 1);
    assert!(outcome.errors[0].starts_with("YAML parsing error: "));
    assert!(outcome.errors[0].contains("duplicate"), "{}", outcome.errors[0]);
}

#[test]
fn test_parse_invalid_config_still_returns_tree() {
    let text = VALID_APP_YML.replace("password: '123456'", "password: 123456");

    let outcome = parse_yaml_config(&text);

    assert!(!outcome.success);
    assert_eq!(
        outcome.errors,
        vec!["Invalid type for dataSource.password: expected string, got number"]
    );
    assert_eq!(outcome.config.unwrap()["dataSource"]["password"], 123456);
}

// =============================================================================
// Generation
// =============================================================================

#[test]
fn test_generate_layout() {
    let yaml = generate_yaml_config(&default_config()).unwrap();

    assert!(yaml.starts_with("server:\n  port: 6400\n"));
    assert!(yaml.contains("\n  eventLoopPoolSize: 0\n"));
    assert!(yaml.contains("proxy: []"));

    let server = yaml.find("server:").unwrap();
    let vertx = yaml.find("vertx:").unwrap();
    let cache = yaml.find("cache:").unwrap();
    assert!(server < vertx && vertx < cache);
}

#[test]
fn test_generate_is_deterministic() {
    let config = default_config();

    assert_eq!(
        generate_yaml_config(&config).unwrap(),
        generate_yaml_config(&config).unwrap()
    );
}
