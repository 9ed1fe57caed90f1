use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserRecord {
    pub data: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessStatus {
    Pending,
    Transformed,
    Saved,
    Error,
}

impl ProcessStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessStatus::Pending => "pending",
            ProcessStatus::Transformed => "transformed",
            ProcessStatus::Saved => "saved",
            ProcessStatus::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessResult {
    pub status: ProcessStatus,
    pub errors: Vec<String>,
    pub processed_data: Option<UserRecord>,
    pub saved_to: Option<String>,
}

impl ProcessResult {
    pub fn pending() -> Self {
        Self {
            status: ProcessStatus::Pending,
            errors: Vec::new(),
            processed_data: None,
            saved_to: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeGroup {
    Minor,
    Adult,
    Senior,
}

impl AgeGroup {
    // minor < 18, adult < 65, senior otherwise
    pub fn from_age(age: f64) -> Self {
        if age < 18.0 {
            AgeGroup::Minor
        } else if age < 65.0 {
            AgeGroup::Adult
        } else {
            AgeGroup::Senior
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeGroup::Minor => "minor",
            AgeGroup::Adult => "adult",
            AgeGroup::Senior => "senior",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ProcessOptions {
    pub validate: bool,
    pub transform: bool,
    pub save: bool,
    pub notify: bool,
    pub write_reports: bool,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            validate: true,
            transform: true,
            save: true,
            notify: false,
            write_reports: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessingStats {
    pub successful: usize,
    pub failed: usize,
    pub transformed: usize,
    pub pending: usize,
    pub minors: usize,
    pub adults: usize,
    pub seniors: usize,
    pub active_users: usize,
    pub verified_users: usize,
}

impl ProcessingStats {
    pub fn record(&mut self, result: &ProcessResult) {
        let has_errors = !result.errors.is_empty();

        if result.status == ProcessStatus::Saved && !has_errors {
            self.successful += 1;
        } else if result.status == ProcessStatus::Error || has_errors {
            self.failed += 1;
        } else if result.status == ProcessStatus::Transformed {
            self.transformed += 1;
        } else {
            self.pending += 1;
        }

        if let Some(data) = &result.processed_data {
            if let Some(group) = data.data.get("age_group").and_then(|v| v.as_str()) {
                match group {
                    "minor" => self.minors += 1,
                    "adult" => self.adults += 1,
                    "senior" => self.seniors += 1,
                    _ => {}
                }
            }

            if data
                .data
                .get("is_active")
                .and_then(|v| v.as_bool())
                .unwrap_or(false)
            {
                self.active_users += 1;
            }

            if data
                .data
                .get("is_verified")
                .and_then(|v| v.as_bool())
                .unwrap_or(false)
            {
                self.verified_users += 1;
            }
        }
    }

    pub fn total(&self) -> usize {
        self.successful + self.failed + self.transformed + self.pending
    }

    pub fn summary(&self) -> HashMap<String, serde_json::Value> {
        let mut summary = HashMap::new();
        summary.insert("total_processed".to_string(), self.total().into());
        summary.insert("successful".to_string(), self.successful.into());
        summary.insert("failed".to_string(), self.failed.into());
        summary.insert("transformed".to_string(), self.transformed.into());
        summary.insert("pending".to_string(), self.pending.into());
        summary.insert("minors".to_string(), self.minors.into());
        summary.insert("adults".to_string(), self.adults.into());
        summary.insert("seniors".to_string(), self.seniors.into());
        summary.insert("active_users".to_string(), self.active_users.into());
        summary.insert("verified_users".to_string(), self.verified_users.into());
        summary
    }
}

#[derive(Debug, Clone)]
pub struct BatchResult {
    pub records: Vec<UserRecord>,
    pub results: Vec<ProcessResult>,
    pub stats: ProcessingStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserReport {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: i64,
    pub address: String,
    pub phone: String,
    pub status: String,
    pub role: String,
    pub registration_date: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub login_count: u64,
    pub total_purchases: f64,
    pub is_premium: bool,
    pub newsletter_subscribed: bool,
    pub marketing_opt_in: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: i64,
    pub display: String,
    pub contact: String,
    pub age: Option<i64>,
}
