use crate::core::report;
use crate::core::{
    AgeGroup, BatchResult, ConfigProvider, Pipeline, ProcessOptions, ProcessResult, ProcessStatus,
    ProcessingStats, Storage, UserRecord,
};
use crate::utils::error::{ProcessorError, Result};
use chrono::Utc;
use serde_json::Value;

pub struct UserPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    options: ProcessOptions,
}

impl<S: Storage, C: ConfigProvider> UserPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            options: ProcessOptions::default(),
        }
    }

    pub fn with_options(storage: S, config: C, options: ProcessOptions) -> Self {
        Self {
            storage,
            config,
            options,
        }
    }

    /// 逐階段處理單筆使用者記錄：validate → transform → save → notify
    pub async fn process_record(&self, user: &UserRecord) -> ProcessResult {
        let mut result = ProcessResult::pending();

        if self.options.validate {
            result.errors.extend(self.validate_user(user));
        }

        if self.options.transform && result.errors.is_empty() {
            result.processed_data = Some(self.transform_user(user));
            result.status = ProcessStatus::Transformed;
        }

        if self.options.save && result.errors.is_empty() {
            if let Some(data) = result.processed_data.clone() {
                match self.save_user(&data).await {
                    Ok(path) => {
                        result.saved_to = Some(path);
                        result.status = ProcessStatus::Saved;
                    }
                    Err(e) => {
                        result.errors.push(format!("Failed to save: {}", e));
                        result.status = ProcessStatus::Error;
                    }
                }
            }
        }

        if self.options.notify
            && result.errors.is_empty()
            && result.status == ProcessStatus::Saved
        {
            if let (Some(data), Some(path)) = (&result.processed_data, &result.saved_to) {
                self.send_notification(data, path);
            }
        }

        result
    }

    fn validate_user(&self, user: &UserRecord) -> Vec<String> {
        let mut errors = Vec::new();

        // 必填欄位檢查，錯誤訊息依欄位順序累積
        for field in self.config.required_fields() {
            if is_missing(user.data.get(field.as_str())) {
                let message = match field.as_str() {
                    "id" => "Missing user ID".to_string(),
                    "email" => "Missing email".to_string(),
                    "name" => "Missing name".to_string(),
                    other => format!("Missing {}", other),
                };
                errors.push(message);
            }
        }

        let (min_age, max_age) = self.config.age_range();
        if is_truthy(user.data.get("age")) {
            match user.data.get("age").and_then(|v| v.as_f64()) {
                Some(age) if age >= min_age && age <= max_age => {}
                _ => errors.push("Invalid age".to_string()),
            }
        }

        if is_truthy(user.data.get("email")) {
            match user.data.get("email").and_then(|v| v.as_str()) {
                Some(email) if email.contains('@') => {}
                _ => errors.push("Invalid email format".to_string()),
            }
        }

        if is_truthy(user.data.get("phone")) {
            // 長度以字元計，而非位元組
            match user.data.get("phone").and_then(|v| v.as_str()) {
                Some(phone) if phone.chars().count() >= self.config.min_phone_length() => {}
                _ => errors.push("Invalid phone number".to_string()),
            }
        }

        errors
    }

    fn transform_user(&self, user: &UserRecord) -> UserRecord {
        let mut data = user.data.clone();

        data.insert(
            "processed_at".to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );
        data.insert(
            "processed_by".to_string(),
            Value::String(self.config.processor_name().to_string()),
        );

        // 正規化 email
        if let Some(email) = user.data.get("email").and_then(|v| v.as_str()) {
            data.insert(
                "email".to_string(),
                Value::String(email.to_lowercase().trim().to_string()),
            );
        }

        // 計算年齡分組
        if let Some(age) = user.data.get("age").and_then(|v| v.as_f64()) {
            data.insert(
                "age_group".to_string(),
                Value::String(AgeGroup::from_age(age).as_str().to_string()),
            );
        }

        // 狀態旗標
        data.insert(
            "is_active".to_string(),
            Value::Bool(is_truthy(user.data.get("active"))),
        );
        data.insert(
            "is_verified".to_string(),
            Value::Bool(is_truthy(user.data.get("verified"))),
        );
        data.insert(
            "has_subscription".to_string(),
            Value::Bool(is_truthy(user.data.get("subscription"))),
        );

        UserRecord { data }
    }

    async fn save_user(&self, data: &UserRecord) -> Result<String> {
        let filename = format!(
            "user_{}_{}.json",
            id_label(data),
            Utc::now().format("%Y%m%d_%H%M%S")
        );
        let path = format!("{}/{}", self.config.output_dir(), filename);

        let json = serde_json::to_vec_pretty(data)?;
        self.storage.write_file(&path, &json).await?;

        tracing::debug!("Saved processed record to {}", path);
        Ok(path)
    }

    fn send_notification(&self, data: &UserRecord, saved_to: &str) -> bool {
        if !self.config.notifications_enabled() {
            tracing::debug!("Notifications disabled, skipping");
            return false;
        }

        let email = data.data.get("email").and_then(|v| v.as_str()).unwrap_or("");
        if email.is_empty() {
            tracing::warn!("📧 Could not send notification: no email address found");
            return false;
        }

        tracing::info!(
            "📧 User {} processed successfully and saved to {} at {}",
            id_label(data),
            saved_to,
            Utc::now().format("%Y-%m-%d %H:%M:%S")
        );
        true
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for UserPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<UserRecord>> {
        let path = self.config.users_file();
        tracing::debug!("Reading users file: {}", path);

        let bytes = self.storage.read_file(path).await.map_err(|e| {
            tracing::error!("❌ Failed to read users file {}: {}", path, e);
            e
        })?;

        let json: Value = serde_json::from_slice(&bytes).map_err(|e| {
            tracing::error!("❌ Invalid JSON in users file {}: {}", path, e);
            ProcessorError::SerializationError(e)
        })?;

        let items = match json {
            Value::Array(items) => items,
            _ => {
                return Err(ProcessorError::ProcessingError {
                    message: format!("Users file {} does not contain a JSON array", path),
                })
            }
        };

        let mut records = Vec::new();
        for item in items {
            if let Value::Object(obj) = item {
                records.push(UserRecord {
                    data: obj.into_iter().collect(),
                });
            } else {
                tracing::warn!("Skipping non-object entry in users file");
            }
        }

        Ok(records)
    }

    async fn transform(&self, users: Vec<UserRecord>) -> Result<BatchResult> {
        // max_users 只限制處理筆數，完整清單保留供寫回
        let limit = self
            .config
            .max_users()
            .unwrap_or(users.len())
            .min(users.len());
        if limit < users.len() {
            tracing::info!("Processing capped at {} of {} records", limit, users.len());
        }

        let mut results = Vec::new();
        let mut stats = ProcessingStats::default();

        for (index, user) in users.iter().take(limit).enumerate() {
            let result = self.process_record(user).await;

            if result.errors.is_empty() {
                tracing::debug!(
                    "Record {} finished with status {}",
                    index,
                    result.status.as_str()
                );
            } else {
                tracing::warn!(
                    "⚠️ Record {} finished with errors: {}",
                    index,
                    result.errors.join("; ")
                );
            }

            stats.record(&result);
            results.push(result);
        }

        Ok(BatchResult {
            records: users,
            results,
            stats,
        })
    }

    async fn load(&self, batch: BatchResult) -> Result<String> {
        // 將使用者清單原樣寫回檔案
        let users_json = serde_json::to_vec_pretty(&batch.records)?;
        self.storage
            .write_file(self.config.users_file(), &users_json)
            .await
            .map_err(|e| {
                tracing::error!(
                    "❌ Error saving users file {}: {}",
                    self.config.users_file(),
                    e
                );
                e
            })?;

        let summary_path = format!("{}/processing_summary.json", self.config.output_dir());
        let summary_json = serde_json::to_vec_pretty(&batch.stats.summary())?;
        self.storage.write_file(&summary_path, &summary_json).await?;

        if self.options.write_reports {
            let mut written = 0usize;
            for result in &batch.results {
                if result.status != ProcessStatus::Saved {
                    continue;
                }
                let Some(data) = &result.processed_data else {
                    continue;
                };
                match report::build_report(data) {
                    Ok(user_report) => {
                        let report_path = format!(
                            "{}/reports/report_{}.json",
                            self.config.output_dir(),
                            user_report.id
                        );
                        let report_json = serde_json::to_vec_pretty(&user_report)?;
                        self.storage.write_file(&report_path, &report_json).await?;
                        written += 1;
                    }
                    Err(e) => tracing::warn!("⚠️ Skipping report: {}", e),
                }
            }
            tracing::info!("📋 Wrote {} user reports", written);
        }

        Ok(self.config.output_dir().to_string())
    }
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
    }
}

fn id_label(record: &UserRecord) -> String {
    match record.data.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => "unknown".to_string(),
    }
}
