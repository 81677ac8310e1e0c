use super::*;
use std::collections::HashMap;
use std::io::Write;

#[test]
fn test_default_config_is_valid() {
    let config = BindingsConfig::default();
    assert_eq!(config.provider.rpc_url, "http://localhost:8545");
    assert!(!config.provider.use_websocket);
    assert_eq!(config.logging.format, LogFormat::Pretty);
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_rejects_bad_urls() {
    let mut config = BindingsConfig::default();
    config.provider.rpc_url = String::new();
    assert!(matches!(config.validate(), Err(ConfigError::MissingRpcUrl)));

    config.provider.rpc_url = "tcp://localhost:8545".to_string();
    assert!(matches!(config.validate(), Err(ConfigError::InvalidRpcUrl { .. })));

    config.provider.rpc_url = "ws://localhost:8546".to_string();
    assert!(matches!(config.validate(), Err(ConfigError::TransportMismatch { .. })));

    config.provider.use_websocket = true;
    assert!(config.validate().is_ok());

    config.provider.poll_interval_ms = 0;
    assert!(matches!(config.validate(), Err(ConfigError::InvalidPollInterval)));
}

#[test]
fn test_load_toml_with_partial_sections() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
[provider]
rpc_url = "wss://node.example:8546"
use_websocket = true
chain_id = 1337

[logging]
format = "json"
"#
    )
    .unwrap();

    let config = BindingsConfig::load_from_file(file.path()).unwrap();
    assert_eq!(config.provider.rpc_url, "wss://node.example:8546");
    assert_eq!(config.provider.chain_id, Some(1337));
    assert_eq!(config.provider.poll_interval_ms, 1000);
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.codegen.output_dir, "./generated");
}

#[test]
fn test_load_json() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"{{"provider": {{"rpc_url": "https://rpc.example"}}}}"#).unwrap();

    let config = BindingsConfig::load_from_file(file.path()).unwrap();
    assert_eq!(config.provider.rpc_url, "https://rpc.example");
}

#[test]
fn test_unsupported_extension() {
    let file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    let err = BindingsConfig::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedFormat { .. }));
}

#[test]
fn test_malformed_toml_reports_parse_error() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[provider").unwrap();

    let err = BindingsConfig::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_overrides_from_lookup() {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("BINDINGS_RPC_URL", "ws://127.0.0.1:8546"),
        ("BINDINGS_USE_WEBSOCKET", "true"),
        ("BINDINGS_LOG_LEVEL", "debug"),
        ("BINDINGS_LOG_FORMAT", "JSON"),
    ]);

    let mut config = BindingsConfig::default();
    config
        .apply_overrides_from(|key| vars.get(key).map(|v| v.to_string()))
        .unwrap();

    assert_eq!(config.provider.rpc_url, "ws://127.0.0.1:8546");
    assert!(config.provider.use_websocket);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, LogFormat::Json);
    assert!(config.validate().is_ok());
}

#[test]
fn test_invalid_override_value() {
    let mut config = BindingsConfig::default();
    let err = config
        .apply_overrides_from(|key| (key == "BINDINGS_USE_WEBSOCKET").then(|| "maybe".to_string()))
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidOverride { .. }));
}
