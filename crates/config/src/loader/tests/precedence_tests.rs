//! Tests for command line > environment > default precedence through the builder.

use secrecy::ExposeSecret;
use serial_test::serial;

use super::env_lock;
use crate::loader::builder::ConfigBuilder;
use crate::loader::error::ConfigError;
use crate::test_util::fixtures;
use crate::types::{OptionDescriptor, ValueOrigin};

fn port_builder() -> ConfigBuilder {
    ConfigBuilder::new("mysvc").option(OptionDescriptor::int("port", 8080, "listen port"))
}

#[test]
#[serial]
fn test_default_applies_without_overrides() {
    let _lock = env_lock().lock().unwrap();
    temp_env::with_var("MYSVC_PORT", None::<&str>, || {
        let config = port_builder().build_from_args(["mysvc"]).unwrap().config;
        assert_eq!(config.get_int("port").unwrap(), 8080);
        assert_eq!(config.origin("port").unwrap(), ValueOrigin::Default);
    });
}

#[test]
#[serial]
fn test_environment_overrides_default() {
    let _lock = env_lock().lock().unwrap();
    temp_env::with_var("MYSVC_PORT", Some("9090"), || {
        let config = port_builder().build_from_args(["mysvc"]).unwrap().config;
        assert_eq!(config.get_int("port").unwrap(), 9090);
        assert_eq!(config.origin("port").unwrap(), ValueOrigin::Environment);
    });
}

#[test]
#[serial]
fn test_command_line_overrides_environment() {
    let _lock = env_lock().lock().unwrap();
    temp_env::with_var("MYSVC_PORT", Some("9090"), || {
        let config = port_builder()
            .build_from_args(["mysvc", "--port=7000"])
            .unwrap()
            .config;
        assert_eq!(config.get_int("port").unwrap(), 7000);
        assert_eq!(config.origin("port").unwrap(), ValueOrigin::CommandLine);
    });
}

#[test]
#[serial]
fn test_bool_flag_forms() {
    let _lock = env_lock().lock().unwrap();
    temp_env::with_var("MYSVC_VERBOSE", None::<&str>, || {
        let build = |args: &[&str]| {
            ConfigBuilder::new("mysvc")
                .option(OptionDescriptor::bool("verbose", false, ""))
                .build_from_args(args.iter().copied())
                .unwrap()
                .config
        };

        assert!(!build(&["mysvc"]).get_bool("verbose").unwrap());
        assert!(build(&["mysvc", "--verbose"]).get_bool("verbose").unwrap());
        assert!(!build(&["mysvc", "--verbose=false"]).get_bool("verbose").unwrap());
    });
}

#[test]
#[serial]
fn test_malformed_environment_value_is_invalid() {
    let _lock = env_lock().lock().unwrap();
    temp_env::with_var("MYSVC_PORT", Some("eighty"), || {
        match port_builder().build_from_args(["mysvc"]) {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "MYSVC_PORT"),
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    });
}

#[test]
#[serial]
fn test_environment_selects_encrypted_file() {
    let _lock = env_lock().lock().unwrap();
    let armored = fixtures().join("secrets/db-password.asc");

    temp_env::with_var(
        "MY_COOL_SERVICE_DB_PASSWORD",
        Some(armored.display().to_string()),
        || {
            let resolution = ConfigBuilder::new("my-cool-service")
                .keyring_home(fixtures().join("keyring"))
                .option(OptionDescriptor::encrypted_file("db-password", "", ""))
                .build_from_args(["my-cool-service"])
                .unwrap();

            let value = resolution.config.get_secret("db-password").unwrap();
            assert_eq!(value.expose_secret(), "hunter2");
        },
    );
}

#[test]
#[serial]
fn test_command_line_path_beats_default_path() {
    let _lock = env_lock().lock().unwrap();
    let default_path = fixtures().join("secrets/service-account.gpg");
    let flag_path = fixtures().join("secrets/api-token.gpg");

    temp_env::with_var("MYSVC_TOKEN", None::<&str>, || {
        let resolution = ConfigBuilder::new("mysvc")
            .keyring_home(fixtures().join("keyring"))
            .option(OptionDescriptor::encrypted_file(
                "token",
                default_path.display().to_string(),
                "",
            ))
            .build_from_args([
                "mysvc".to_string(),
                format!("--token={}", flag_path.display()),
            ])
            .unwrap();

        let value = resolution.config.get_secret("token").unwrap();
        assert_eq!(value.expose_secret(), "no-trailing-newline");
    });
}
