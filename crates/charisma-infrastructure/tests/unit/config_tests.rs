//! Configuration loader tests

use std::time::Duration;

use charisma_domain::error::Error;
use charisma_infrastructure::config::{AppConfig, ConfigLoader};
use charisma_infrastructure::config::loader::validate_app_config;
use figment::Jail;

const ACCESS: &str = "access-secret-that-is-at-least-32-chars";
const REFRESH: &str = "refresh-secret-that-is-at-least-32-chars";

fn valid_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.jwt.access_secret = ACCESS.to_string();
    config.auth.jwt.refresh_secret = REFRESH.to_string();
    config
}

#[test]
fn test_defaults_without_secrets_rejected() {
    let err = validate_app_config(&AppConfig::default()).unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
    assert!(err.to_string().contains("secret"));
}

#[test]
fn test_defaults_with_secrets_accepted() {
    let config = valid_config();
    validate_app_config(&config).unwrap();
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.auth.header, "Authorization");
    assert_eq!(config.auth.verifier_key, "tokensService");
    assert_eq!(
        config.modules.roots,
        ["modules/application", "modules/domains"]
    );
}

#[test]
fn test_invalid_sections_rejected() {
    let mut config = valid_config();
    config.server.port = 0;
    assert!(validate_app_config(&config).is_err());

    let mut config = valid_config();
    config.auth.jwt.access_secret = "short".to_string();
    assert!(validate_app_config(&config).is_err());

    let mut config = valid_config();
    config.auth.jwt.access_expiry = "forever".to_string();
    assert!(validate_app_config(&config).is_err());

    let mut config = valid_config();
    config.auth.jwt.refresh_expiry = "0s".to_string();
    assert!(validate_app_config(&config).is_err());

    let mut config = valid_config();
    config.cache.default_ttl_secs = 0;
    assert!(validate_app_config(&config).is_err());

    let mut config = valid_config();
    config.tasks.capacity = 0;
    assert!(validate_app_config(&config).is_err());

    let mut config = valid_config();
    config.modules.roots = vec![" ".to_string()];
    assert!(validate_app_config(&config).is_err());
}

#[test]
fn test_token_settings_conversion() {
    let settings = valid_config().auth.jwt.to_settings().unwrap();
    assert_eq!(settings.access_expiry, Duration::from_secs(15 * 60));
    assert_eq!(settings.refresh_expiry, Duration::from_secs(7 * 24 * 60 * 60));
    assert_eq!(settings.algorithm, "HS256");
    assert_eq!(settings.clock_tolerance, Duration::from_secs(30));
}

#[test]
fn test_jwt_debug_redacts_secrets() {
    let rendered = format!("{:?}", valid_config().auth.jwt);
    assert!(!rendered.contains(ACCESS));
    assert!(rendered.contains("<redacted>"));
}

#[test]
fn test_file_then_env_layering() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "charisma.toml",
            &format!(
                r#"
                [server]
                port = 8080

                [auth]
                header = "X-Auth"

                [auth.jwt]
                access_secret = "{ACCESS}"
                refresh_secret = "{REFRESH}"
                access_expiry = "5m"
                "#
            ),
        )?;
        jail.set_env("CHARISMA__SERVER__PORT", "9090");
        jail.set_env("CHARISMA__CACHE__DEFAULT_TTL_SECS", "120");

        let config = ConfigLoader::new().load().map_err(|e| e.to_string())?;
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.auth.header, "X-Auth");
        assert_eq!(config.auth.jwt.access_expiry, "5m");
        assert_eq!(config.cache.default_ttl_secs, 120);
        Ok(())
    });
}

#[test]
fn test_explicit_missing_file_rejected() {
    Jail::expect_with(|_| {
        let result = ConfigLoader::new()
            .with_config_path("does-not-exist.toml")
            .load();
        assert!(matches!(result, Err(Error::Configuration { .. })));
        Ok(())
    });
}

#[test]
fn test_custom_env_prefix() {
    Jail::expect_with(|jail| {
        jail.set_env("APP__AUTH__JWT__ACCESS_SECRET", ACCESS);
        jail.set_env("APP__AUTH__JWT__REFRESH_SECRET", REFRESH);
        jail.set_env("APP__SERVER__PORT", "4000");

        let config = ConfigLoader::new()
            .with_env_prefix("APP")
            .load()
            .map_err(|e| e.to_string())?;
        assert_eq!(config.server.port, 4000);
        Ok(())
    });
}

#[test]
fn test_save_then_load() {
    Jail::expect_with(|jail| {
        let path = jail.directory().join("saved.toml");
        let mut config = valid_config();
        config.server.port = 7070;

        let loader = ConfigLoader::new();
        loader
            .save_to_file(&config, &path)
            .map_err(|e| e.to_string())?;
        let loaded = ConfigLoader::new()
            .with_config_path(&path)
            .load()
            .map_err(|e| e.to_string())?;
        assert_eq!(loaded.server.port, 7070);
        assert_eq!(loaded.auth.jwt.access_secret, ACCESS);
        Ok(())
    });
}

#[test]
fn test_save_to_missing_directory_names_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent").join("saved.toml");

    let err = ConfigLoader::new()
        .save_to_file(&valid_config(), &path)
        .unwrap_err();
    assert!(matches!(err, Error::Infrastructure { .. }));
    assert!(err.to_string().contains("saved.toml"));
}
