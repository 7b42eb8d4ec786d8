/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use nmt_worker::app_config::{Config, EngineConfig, FactorAxis, LogLevel};
use tempfile::TempDir;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.char_limit, 10000);
    assert_eq!(config.factors.lang.default_factor(), Some("et"));
    assert_eq!(config.factors.lang.lookup("en"), Some("<2en>"));
    assert!(config.factors.domain.is_some());
    assert!(config.qe.is_none());
    assert_eq!(config.engine.timeout_secs, 60);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    // Default language must be a mapping key
    config.factors.lang.factors.insert(0, "xx".to_string());
    assert!(config.validate().is_err());
    config.factors.lang.factors.remove(0);
    assert!(config.validate().is_ok());

    // Empty language list
    let languages = std::mem::take(&mut config.factors.lang.factors);
    assert!(config.validate().is_err());
    config.factors.lang.factors = languages;

    // Empty domain list
    config.factors.domain = Some(FactorAxis::default());
    assert!(config.validate().is_err());
    config.factors.domain = None;
    assert!(config.validate().is_ok());

    // Zero character limit
    config.char_limit = 0;
    assert!(config.validate().is_err());
    config.char_limit = 10;

    // Invalid QE endpoint
    config.qe = Some(EngineConfig { endpoint: "not a url".to_string(), timeout_secs: 5 });
    assert!(config.validate().is_err());
}

/// Test parsing a config with only the required fields
#[test]
fn test_config_fromJson_withMinimalFields_shouldApplyDefaults() -> Result<()> {
    let json = r#"{
        "factors": {
            "lang": {"factors": ["en", "et"], "mapping": {"en": "<2en>", "et": "<2et>"}}
        },
        "qe": {"endpoint": "http://localhost:9000"},
        "log_level": "debug"
    }"#;

    let config: Config = serde_json::from_str(json)?;
    assert_eq!(config.char_limit, 10000);
    assert!(config.factors.domain.is_none());
    assert_eq!(config.qe.as_ref().map(|qe| qe.timeout_secs), Some(60));
    assert_eq!(config.log_level, LogLevel::Debug);
    assert!(config.validate().is_ok());
    Ok(())
}

/// Test that a missing config file is created with defaults
#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaultConfig() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("conf.json");

    let created = Config::load_or_create(&path)?;
    assert!(path.exists());

    let loaded = Config::load_or_create(&path)?;
    assert_eq!(loaded.factors, created.factors);
    assert_eq!(loaded.char_limit, created.char_limit);
    Ok(())
}

/// Test that a broken config file is reported
#[test]
fn test_fromFile_withInvalidJson_shouldFail() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("conf.json");
    std::fs::write(&path, "{ not json")?;

    let error = Config::from_file(&path).unwrap_err();
    assert!(error.to_string().contains("Failed to parse config file"));
    Ok(())
}
