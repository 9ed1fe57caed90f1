pub mod calc;
pub mod engine;
pub mod pipeline;
pub mod report;

pub use crate::domain::model::{
    AgeGroup, BatchResult, ProcessOptions, ProcessResult, ProcessStatus, ProcessingStats,
    UserRecord,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
