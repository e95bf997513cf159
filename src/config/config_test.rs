use std::path::PathBuf;
use std::time::Duration;

use config::Config;
use serial_test::serial;

use crate::CreationError;
use crate::Error;
use crate::InstanceConfig;
use crate::PollPolicy;

/// Case 1: hardcoded defaults
#[test]
fn test_defaults_case1() {
    let config = InstanceConfig::default();
    assert!(config.name.is_empty());
    assert_eq!(config.listen_addr, "127.0.0.1:9081");
    assert!(config.backend_endpoints.is_empty());
    assert_eq!(config.log_dir, PathBuf::from("/tmp/tempo/logs"));
}

/// Case 2: resolution normalizes the listen address and fills the name
#[test]
fn test_resolve_case2() {
    let config = InstanceConfig {
        listen_addr: "127.0.0.1:20202".to_string(),
        backend_endpoints: "http://127.0.0.1:2379".to_string(),
        ..InstanceConfig::default()
    };

    let resolved = config.resolve().expect("resolve should succeed");
    assert_eq!(resolved.listen_addr, "http://127.0.0.1:20202");
    assert_eq!(resolved.name, "http://127.0.0.1:20202");
}

/// Case 3: an already-normalized address and an explicit name pass through
#[test]
fn test_resolve_case3() {
    let config = InstanceConfig {
        name: "tso-alpha".to_string(),
        listen_addr: "http://127.0.0.1:20203".to_string(),
        backend_endpoints: "http://127.0.0.1:2379".to_string(),
        ..InstanceConfig::default()
    };

    let resolved = config.resolve().expect("resolve should succeed");
    assert_eq!(resolved.listen_addr, "http://127.0.0.1:20203");
    assert_eq!(resolved.name, "tso-alpha");
}

/// Case 4: validation rejects a configuration without backend endpoints
#[test]
fn test_validate_case4() {
    let config = InstanceConfig {
        listen_addr: "127.0.0.1:20204".to_string(),
        ..InstanceConfig::default()
    };

    let result = config.validate();
    assert!(matches!(
        result,
        Err(Error::Creation(CreationError::ConfigResolution(_)))
    ));
}

/// Case 5: validation rejects an empty listen address
#[test]
fn test_validate_case5() {
    let config = InstanceConfig {
        listen_addr: String::new(),
        backend_endpoints: "http://127.0.0.1:2379".to_string(),
        ..InstanceConfig::default()
    };

    assert!(config.validate().is_err());
}

/// Case 6: partial TOML is filled from field defaults
#[test]
fn test_toml_case6() {
    let toml = r#"
        listen_addr = '127.0.0.1:20206'
        backend_endpoints = 'http://127.0.0.1:2379'
    "#;

    let settings = Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()
        .expect("toml should parse");
    let config: InstanceConfig = settings.try_deserialize().expect("deserialize should succeed");

    assert_eq!(config.listen_addr, "127.0.0.1:20206");
    assert_eq!(config.backend_endpoints, "http://127.0.0.1:2379");
    assert!(config.name.is_empty());
    assert_eq!(config.log_dir, PathBuf::from("/tmp/tempo/logs"));
}

/// Case 7: environment variables are the highest-priority source
#[test]
#[serial]
fn test_env_override_case7() {
    temp_env::with_var(
        "TEMPO__BACKEND_ENDPOINTS",
        Some("http://127.0.0.1:2379,http://127.0.0.1:2381"),
        || {
            let config = InstanceConfig::load(None).expect("load should succeed");
            assert_eq!(
                config.backend_endpoints,
                "http://127.0.0.1:2379,http://127.0.0.1:2381"
            );
        },
    );
}

/// Case 8: the default poll policy is 5s with a 50ms tick
#[test]
fn test_poll_policy_case8() {
    let policy = PollPolicy::default();
    assert_eq!(policy.wait_for(), Duration::from_secs(5));
    assert_eq!(policy.tick_interval(), Duration::from_millis(50));
}

/// Case 9: a partial poll policy override keeps the other default
#[test]
fn test_poll_policy_case9() {
    let settings = Config::builder()
        .add_source(config::File::from_str("wait_for_ms = 200", config::FileFormat::Toml))
        .build()
        .expect("toml should parse");
    let policy: PollPolicy = settings.try_deserialize().expect("deserialize should succeed");

    assert_eq!(policy.wait_for(), Duration::from_millis(200));
    assert_eq!(policy.tick_interval(), Duration::from_millis(50));
}
