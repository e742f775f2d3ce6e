use crate::domain::model::{Record, ReportResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn source_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn report_filename(&self) -> &str;
}

/// Source of the date stamped into the report. Injected so rendering stays
/// deterministic under test.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Record>>;
    async fn transform(&self, records: Vec<Record>) -> Result<ReportResult>;
    async fn load(&self, result: ReportResult) -> Result<String>;
}
