use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ProcessorError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_path, validate_positive_number,
    validate_range, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JsonConfig {
    pub processor_name: Option<String>,
    pub output_dir: Option<String>,
    pub users_file: Option<String>,
    pub admin_mode: Option<bool>,
    pub max_users: Option<usize>,
    pub validation: Option<ValidationSettings>,
    pub notifications: Option<NotificationSettings>,
    pub monitoring: Option<MonitoringSettings>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationSettings {
    pub required_fields: Option<Vec<String>>,
    pub min_age: Option<f64>,
    pub max_age: Option<f64>,
    pub min_phone_length: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringSettings {
    pub enabled: bool,
}

impl JsonConfig {
    /// 從 JSON 檔案載入配置
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            tracing::error!("❌ Failed to read config file {}: {}", path, e);
            ProcessorError::IoError(e)
        })?;

        match Self::from_json_str(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::error!("❌ Failed to parse config file {}: {}", path, e);
                Err(e)
            }
        }
    }

    /// 從 JSON 字串解析配置，支援 ${VAR} 環境變數替換
    pub fn from_json_str(content: &str) -> Result<Self> {
        let substituted = substitute_env_vars(content)?;
        serde_json::from_str(&substituted).map_err(|e| ProcessorError::ConfigValidationError {
            field: "json_parsing".to_string(),
            message: format!("JSON parsing error: {}", e),
        })
    }

    /// 驗證配置
    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("processor_name", self.processor_name())?;
        validate_path("output_dir", self.output_dir())?;
        validate_path("users_file", self.users_file())?;
        validate_file_extension("users_file", self.users_file(), &["json"])?;

        if let Some(max_users) = self.max_users {
            validate_positive_number("max_users", max_users, 1)?;
        }

        if let Some(validation) = &self.validation {
            let (min_age, max_age) = self.age_range();
            validate_range("validation.min_age", min_age, 0.0, max_age)?;

            if let Some(min_phone_length) = validation.min_phone_length {
                validate_positive_number("validation.min_phone_length", min_phone_length, 1)?;
            }

            if let Some(required_fields) = &validation.required_fields {
                for field in required_fields {
                    validate_non_empty_string("validation.required_fields", field)?;
                }
            }
        }

        Ok(())
    }

    /// 取得處理器名稱
    pub fn processor_name(&self) -> &str {
        self.processor_name.as_deref().unwrap_or("default")
    }

    /// 取得輸出目錄
    pub fn output_dir(&self) -> &str {
        self.output_dir.as_deref().unwrap_or("./output")
    }

    /// 取得使用者資料檔案路徑
    pub fn users_file(&self) -> &str {
        self.users_file.as_deref().unwrap_or("users.json")
    }

    /// 是否為管理模式
    pub fn admin_mode(&self) -> bool {
        self.admin_mode.unwrap_or(false)
    }

    /// 取得單批次最大使用者數
    pub fn max_users(&self) -> Option<usize> {
        self.max_users
    }

    /// 取得必填欄位清單
    pub fn required_fields(&self) -> Vec<String> {
        self.validation
            .as_ref()
            .and_then(|v| v.required_fields.clone())
            .unwrap_or_else(|| vec!["id".to_string(), "email".to_string(), "name".to_string()])
    }

    /// 取得合法年齡範圍
    pub fn age_range(&self) -> (f64, f64) {
        let validation = self.validation.as_ref();
        let min_age = validation.and_then(|v| v.min_age).unwrap_or(0.0);
        let max_age = validation.and_then(|v| v.max_age).unwrap_or(150.0);
        (min_age, max_age)
    }

    /// 取得電話號碼最小長度
    pub fn min_phone_length(&self) -> usize {
        self.validation
            .as_ref()
            .and_then(|v| v.min_phone_length)
            .unwrap_or(10)
    }

    /// 是否啟用通知
    pub fn notifications_enabled(&self) -> bool {
        self.notifications.as_ref().map(|n| n.enabled).unwrap_or(true)
    }

    /// 是否啟用系統監控
    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

fn substitute_env_vars(content: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([^}]+)\}").unwrap();
    let result = re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    });
    Ok(result.to_string())
}

impl ConfigProvider for JsonConfig {
    fn processor_name(&self) -> &str {
        self.processor_name()
    }

    fn output_dir(&self) -> &str {
        self.output_dir()
    }

    fn users_file(&self) -> &str {
        self.users_file()
    }

    fn admin_mode(&self) -> bool {
        self.admin_mode()
    }

    fn max_users(&self) -> Option<usize> {
        self.max_users()
    }

    fn required_fields(&self) -> Vec<String> {
        self.required_fields()
    }

    fn age_range(&self) -> (f64, f64) {
        self.age_range()
    }

    fn min_phone_length(&self) -> usize {
        self.min_phone_length()
    }

    fn notifications_enabled(&self) -> bool {
        self.notifications_enabled()
    }
}

impl Validate for JsonConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
