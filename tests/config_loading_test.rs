use anyhow::Result;
use tempfile::TempDir;
use user_etl::utils::error::{ErrorCategory, ProcessorError};
use user_etl::JsonConfig;

/// 從檔案載入配置並套用預設值
#[tokio::test]
async fn test_load_config_from_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("config.json");

    tokio::fs::write(
        &config_path,
        r#"{
            "processor_name": "nightly-batch",
            "users_file": "data/users.json",
            "max_users": 50
        }"#,
    )
    .await?;

    let config = JsonConfig::from_file(config_path.to_str().unwrap())?;

    assert_eq!(config.processor_name(), "nightly-batch");
    assert_eq!(config.users_file(), "data/users.json");
    assert_eq!(config.max_users(), Some(50));
    // unspecified values fall back to defaults
    assert_eq!(config.output_dir(), "./output");
    assert_eq!(config.min_phone_length(), 10);

    Ok(())
}

/// 檔案不存在時回傳 IO 錯誤
#[tokio::test]
async fn test_missing_config_file_is_io_error() {
    let result = JsonConfig::from_file("no_such_config.json");
    assert!(matches!(result, Err(ProcessorError::IoError(_))));
}

/// 無效 JSON 歸類為配置錯誤
#[tokio::test]
async fn test_invalid_json_is_configuration_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("config.json");
    tokio::fs::write(&config_path, "{broken").await?;

    let error = JsonConfig::from_file(config_path.to_str().unwrap()).unwrap_err();
    assert_eq!(error.category(), ErrorCategory::Configuration);

    Ok(())
}

/// ${VAR} 會替換為環境變數的值
#[tokio::test]
async fn test_env_var_substitution_in_config_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("config.json");

    std::env::set_var("USER_ETL_IT_OUTPUT", "./custom-output");
    tokio::fs::write(
        &config_path,
        r#"{"output_dir": "${USER_ETL_IT_OUTPUT}"}"#,
    )
    .await?;

    let config = JsonConfig::from_file(config_path.to_str().unwrap())?;
    assert_eq!(config.output_dir(), "./custom-output");

    std::env::remove_var("USER_ETL_IT_OUTPUT");
    Ok(())
}

/// 空物件配置可以通過驗證
#[tokio::test]
async fn test_empty_object_config_is_valid() -> Result<()> {
    let config = JsonConfig::from_json_str("{}")?;
    config.validate_config()?;
    Ok(())
}

/// 不認識的鍵會被忽略
#[tokio::test]
async fn test_unknown_keys_are_ignored() -> Result<()> {
    let config = JsonConfig::from_json_str(
        r#"{"processor_name": "x", "legacy_option": {"nested": true}}"#,
    )?;
    assert_eq!(config.processor_name(), "x");
    Ok(())
}

/// 驗證會攔下不合理的設定值
#[tokio::test]
async fn test_validation_failures() -> Result<()> {
    let yaml_users = JsonConfig::from_json_str(r#"{"users_file": "users.yaml"}"#)?;
    assert!(yaml_users.validate_config().is_err());

    let zero_max = JsonConfig::from_json_str(r#"{"max_users": 0}"#)?;
    assert!(zero_max.validate_config().is_err());

    let inverted_ages =
        JsonConfig::from_json_str(r#"{"validation": {"min_age": 90.0, "max_age": 30.0}}"#)?;
    assert!(inverted_ages.validate_config().is_err());

    Ok(())
}
