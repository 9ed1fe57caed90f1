use crate::domain::model::{BatchResult, UserRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn processor_name(&self) -> &str;
    fn output_dir(&self) -> &str;
    fn users_file(&self) -> &str;

    fn admin_mode(&self) -> bool {
        false
    }

    fn max_users(&self) -> Option<usize> {
        None
    }

    fn required_fields(&self) -> Vec<String> {
        vec!["id".to_string(), "email".to_string(), "name".to_string()]
    }

    fn age_range(&self) -> (f64, f64) {
        (0.0, 150.0)
    }

    fn min_phone_length(&self) -> usize {
        10
    }

    fn notifications_enabled(&self) -> bool {
        true
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<UserRecord>>;
    async fn transform(&self, users: Vec<UserRecord>) -> Result<BatchResult>;
    async fn load(&self, batch: BatchResult) -> Result<String>;
}
