use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::ResourceMonitor;

pub struct BatchEngine<P: Pipeline> {
    pipeline: P,
    monitor: ResourceMonitor,
}

impl<P: Pipeline> BatchEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            monitor: ResourceMonitor::new(false),
        }
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: ResourceMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("🚀 Starting batch processing");
        self.monitor.log_phase("Startup");

        tracing::info!("📥 Loading user records...");
        let users = self.pipeline.extract().await?;
        tracing::info!("📥 Loaded {} user records", users.len());
        self.monitor.log_phase("Extract");

        tracing::info!("🔄 Processing records...");
        let batch = self.pipeline.transform(users).await?;
        tracing::info!(
            "🔄 Processed {} records ({} successful, {} failed)",
            batch.results.len(),
            batch.stats.successful,
            batch.stats.failed
        );
        self.monitor.log_phase("Transform");

        tracing::info!("💾 Writing outputs...");
        let stats = batch.stats.clone();
        let output_path = self.pipeline.load(batch).await?;
        tracing::info!("💾 Output saved to: {}", output_path);
        self.monitor.log_phase("Load");

        // 批次統計摘要
        tracing::info!(
            "📊 Batch summary: {} total, {} successful, {} failed, {} transformed, {} pending",
            stats.total(),
            stats.successful,
            stats.failed,
            stats.transformed,
            stats.pending
        );
        tracing::info!(
            "📊 User buckets: {} minors, {} adults, {} seniors, {} active, {} verified",
            stats.minors,
            stats.adults,
            stats.seniors,
            stats.active_users,
            stats.verified_users
        );

        self.monitor.log_summary();
        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{BatchResult, ProcessingStats, UserRecord};
    use crate::utils::error::ProcessorError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubPipeline {
        extract_calls: AtomicUsize,
        load_calls: AtomicUsize,
        fail_extract: bool,
    }

    impl StubPipeline {
        fn new(fail_extract: bool) -> Self {
            Self {
                extract_calls: AtomicUsize::new(0),
                load_calls: AtomicUsize::new(0),
                fail_extract,
            }
        }
    }

    #[async_trait]
    impl Pipeline for StubPipeline {
        async fn extract(&self) -> Result<Vec<UserRecord>> {
            self.extract_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_extract {
                return Err(ProcessorError::ProcessingError {
                    message: "no input".to_string(),
                });
            }
            Ok(vec![])
        }

        async fn transform(&self, users: Vec<UserRecord>) -> Result<BatchResult> {
            Ok(BatchResult {
                records: users,
                results: vec![],
                stats: ProcessingStats::default(),
            })
        }

        async fn load(&self, _batch: BatchResult) -> Result<String> {
            self.load_calls.fetch_add(1, Ordering::SeqCst);
            Ok("./output".to_string())
        }
    }

    #[tokio::test]
    async fn test_run_executes_all_stages() {
        let engine = BatchEngine::new(StubPipeline::new(false));
        let output = engine.run().await.unwrap();

        assert_eq!(output, "./output");
        assert_eq!(engine.pipeline.extract_calls.load(Ordering::SeqCst), 1);
        assert_eq!(engine.pipeline.load_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_run_stops_on_extract_failure() {
        let engine = BatchEngine::new_with_monitoring(StubPipeline::new(true), false);
        let result = engine.run().await;

        assert!(result.is_err());
        assert_eq!(engine.pipeline.load_calls.load(Ordering::SeqCst), 0);
    }
}
