use crate::domain::model::{UserProfile, UserRecord, UserReport};
use crate::utils::error::{ProcessorError, Result};
use chrono::{DateTime, Utc};

/// Builds a report with a fixed field set from a raw user record.
///
/// Missing fields fall back to neutral defaults, only the numeric id is
/// required because it names the report file.
pub fn build_report(record: &UserRecord) -> Result<UserReport> {
    let id = record
        .data
        .get("id")
        .and_then(|v| v.as_i64())
        .ok_or_else(|| ProcessorError::ValidationError {
            message: "User record has no numeric id".to_string(),
        })?;

    Ok(UserReport {
        id,
        name: string_field(record, "name"),
        email: string_field(record, "email"),
        age: record
            .data
            .get("age")
            .and_then(|v| v.as_f64())
            .map(|age| age as i64)
            .unwrap_or(0),
        address: string_field(record, "address"),
        phone: string_field(record, "phone"),
        status: string_field_or(record, "status", "active"),
        role: string_field_or(record, "role", "user"),
        registration_date: date_field(record, "registration_date").unwrap_or_else(Utc::now),
        last_login: date_field(record, "last_login"),
        login_count: record
            .data
            .get("login_count")
            .and_then(|v| v.as_u64())
            .unwrap_or(0),
        total_purchases: record
            .data
            .get("total_purchases")
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0),
        is_premium: bool_field(record, "is_premium"),
        newsletter_subscribed: bool_field(record, "newsletter_subscribed"),
        marketing_opt_in: bool_field(record, "marketing_opt_in"),
    })
}

/// 建立顯示用的使用者摘要，管理模式下角色為 Admin
pub fn build_profile(record: &UserRecord, admin_mode: bool) -> Result<UserProfile> {
    let name = record.data.get("name").and_then(|v| v.as_str()).unwrap_or("");
    let email = record
        .data
        .get("email")
        .and_then(|v| v.as_str())
        .unwrap_or("");

    if name.is_empty() || email.is_empty() {
        return Err(ProcessorError::ValidationError {
            message: "Invalid user data".to_string(),
        });
    }

    let role = if admin_mode { "Admin" } else { "Guest" };

    Ok(UserProfile {
        id: Utc::now().timestamp_millis(),
        display: format!("User: {} ({})", name, role),
        contact: email.to_string(),
        age: record.data.get("age").and_then(|v| v.as_i64()),
    })
}

fn string_field(record: &UserRecord, key: &str) -> String {
    record
        .data
        .get(key)
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string()
}

fn string_field_or(record: &UserRecord, key: &str, default: &str) -> String {
    record
        .data
        .get(key)
        .and_then(|v| v.as_str())
        .unwrap_or(default)
        .to_string()
}

fn date_field(record: &UserRecord, key: &str) -> Option<DateTime<Utc>> {
    record
        .data
        .get(key)
        .and_then(|v| v.as_str())
        .and_then(|s| s.parse::<DateTime<Utc>>().ok())
}

fn bool_field(record: &UserRecord, key: &str) -> bool {
    record
        .data
        .get(key)
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}
