use tempfile::TempDir;
use user_etl::core::ProcessStatus;
use user_etl::domain::model::{ProcessOptions, UserRecord};
use user_etl::domain::ports::Pipeline;
use user_etl::{JsonConfig, LocalStorage, UserPipeline};

fn record(value: serde_json::Value) -> UserRecord {
    match value {
        serde_json::Value::Object(obj) => UserRecord {
            data: obj.into_iter().collect(),
        },
        _ => panic!("test record must be a JSON object"),
    }
}

fn validation_pipeline(temp_dir: &TempDir) -> UserPipeline<LocalStorage, JsonConfig> {
    // save stage off, these tests only look at validation and transform output
    let options = ProcessOptions {
        save: false,
        ..ProcessOptions::default()
    };
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    UserPipeline::with_options(storage, JsonConfig::default(), options)
}

#[tokio::test]
async fn test_empty_record_reports_all_missing_fields() {
    let temp_dir = TempDir::new().unwrap();
    let pipeline = validation_pipeline(&temp_dir);

    let batch = pipeline
        .transform(vec![record(serde_json::json!({}))])
        .await
        .unwrap();

    assert_eq!(
        batch.results[0].errors,
        vec!["Missing user ID", "Missing email", "Missing name"]
    );
    assert_eq!(batch.results[0].status, ProcessStatus::Pending);
    assert_eq!(batch.stats.failed, 1);
}

#[tokio::test]
async fn test_age_group_boundaries() {
    let temp_dir = TempDir::new().unwrap();
    let pipeline = validation_pipeline(&temp_dir);

    let users: Vec<UserRecord> = [17, 18, 64, 65]
        .iter()
        .map(|age| {
            record(serde_json::json!({
                "id": age,
                "name": format!("Age {}", age),
                "email": format!("age{}@example.com", age),
                "age": age
            }))
        })
        .collect();

    let batch = pipeline.transform(users).await.unwrap();

    let groups: Vec<String> = batch
        .results
        .iter()
        .map(|result| {
            result.processed_data.as_ref().unwrap().data["age_group"]
                .as_str()
                .unwrap()
                .to_string()
        })
        .collect();

    assert_eq!(groups, vec!["minor", "adult", "adult", "senior"]);
    assert_eq!(batch.stats.minors, 1);
    assert_eq!(batch.stats.adults, 2);
    assert_eq!(batch.stats.seniors, 1);
}

#[tokio::test]
async fn test_out_of_range_and_non_numeric_ages_are_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let pipeline = validation_pipeline(&temp_dir);

    for bad_age in [
        serde_json::json!(-5),
        serde_json::json!(200),
        serde_json::json!("thirty"),
    ] {
        let batch = pipeline
            .transform(vec![record(serde_json::json!({
                "id": 1,
                "name": "A",
                "email": "a@example.com",
                "age": bad_age
            }))])
            .await
            .unwrap();

        assert_eq!(batch.results[0].errors, vec!["Invalid age"]);
    }
}

#[tokio::test]
async fn test_zero_age_passes_validation() {
    let temp_dir = TempDir::new().unwrap();
    let pipeline = validation_pipeline(&temp_dir);

    let batch = pipeline
        .transform(vec![record(serde_json::json!({
            "id": 1,
            "name": "Newborn",
            "email": "n@example.com",
            "age": 0
        }))])
        .await
        .unwrap();

    assert!(batch.results[0].errors.is_empty());
    let data = batch.results[0].processed_data.as_ref().unwrap();
    assert_eq!(data.data["age_group"], "minor");
}

#[tokio::test]
async fn test_email_rules() {
    let temp_dir = TempDir::new().unwrap();
    let pipeline = validation_pipeline(&temp_dir);

    // normalized on transform
    let batch = pipeline
        .transform(vec![record(serde_json::json!({
            "id": 1,
            "name": "A",
            "email": "  USER@EXAMPLE.COM "
        }))])
        .await
        .unwrap();
    let data = batch.results[0].processed_data.as_ref().unwrap();
    assert_eq!(data.data["email"], "user@example.com");

    // missing @ is a format error
    let batch = pipeline
        .transform(vec![record(serde_json::json!({
            "id": 1,
            "name": "A",
            "email": "bademail"
        }))])
        .await
        .unwrap();
    assert_eq!(batch.results[0].errors, vec!["Invalid email format"]);

    // blank email only counts as missing
    let batch = pipeline
        .transform(vec![record(serde_json::json!({
            "id": 1,
            "name": "A",
            "email": ""
        }))])
        .await
        .unwrap();
    assert_eq!(batch.results[0].errors, vec!["Missing email"]);
}

#[tokio::test]
async fn test_phone_rules() {
    let temp_dir = TempDir::new().unwrap();
    let pipeline = validation_pipeline(&temp_dir);

    let batch = pipeline
        .transform(vec![record(serde_json::json!({
            "id": 1,
            "name": "A",
            "email": "a@example.com",
            "phone": "123"
        }))])
        .await
        .unwrap();
    assert_eq!(batch.results[0].errors, vec!["Invalid phone number"]);

    let batch = pipeline
        .transform(vec![record(serde_json::json!({
            "id": 1,
            "name": "A",
            "email": "a@example.com",
            "phone": "0912345678"
        }))])
        .await
        .unwrap();
    assert!(batch.results[0].errors.is_empty());
}

#[tokio::test]
async fn test_custom_required_fields_from_config() {
    let temp_dir = TempDir::new().unwrap();

    let config = JsonConfig::from_json_str(
        r#"{
            "validation": {
                "required_fields": ["id", "email", "name", "country"]
            }
        }"#,
    )
    .unwrap();

    let options = ProcessOptions {
        save: false,
        ..ProcessOptions::default()
    };
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let pipeline = UserPipeline::with_options(storage, config, options);

    let batch = pipeline
        .transform(vec![record(serde_json::json!({
            "id": 1,
            "name": "A",
            "email": "a@example.com"
        }))])
        .await
        .unwrap();

    assert_eq!(batch.results[0].errors, vec!["Missing country"]);
}

#[tokio::test]
async fn test_custom_age_range_from_config() {
    let temp_dir = TempDir::new().unwrap();

    let config = JsonConfig::from_json_str(
        r#"{
            "validation": {
                "min_age": 18.0,
                "max_age": 99.0
            }
        }"#,
    )
    .unwrap();

    let options = ProcessOptions {
        save: false,
        ..ProcessOptions::default()
    };
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let pipeline = UserPipeline::with_options(storage, config, options);

    let batch = pipeline
        .transform(vec![record(serde_json::json!({
            "id": 1,
            "name": "A",
            "email": "a@example.com",
            "age": 16
        }))])
        .await
        .unwrap();

    assert_eq!(batch.results[0].errors, vec!["Invalid age"]);
}
