use crate::core::{extract, report, stats};
use crate::core::{Clock, ConfigProvider, Pipeline, Record, ReportResult, Storage};
use crate::utils::error::Result;

/// The one pipeline this tool ships: read the source document, extract the
/// catalog, aggregate it and write the markdown report.
pub struct CatalogPipeline<S: Storage, C: ConfigProvider, T: Clock> {
    storage: S,
    config: C,
    clock: T,
}

impl<S: Storage, C: ConfigProvider, T: Clock> CatalogPipeline<S, C, T> {
    pub fn new(storage: S, config: C, clock: T) -> Self {
        Self {
            storage,
            config,
            clock,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, T: Clock> Pipeline for CatalogPipeline<S, C, T> {
    async fn extract(&self) -> Result<Vec<Record>> {
        tracing::debug!("Reading source document: {}", self.config.source_path());
        let bytes = self.storage.read_file(self.config.source_path()).await?;

        // 尋找目錄區塊並解析
        let text = String::from_utf8_lossy(&bytes);
        let records = extract::extract_catalog(&text);

        if records.is_empty() {
            tracing::warn!("No catalog entries found in source document");
        } else {
            tracing::debug!("Extracted {} catalog entries", records.len());
        }

        Ok(records)
    }

    async fn transform(&self, records: Vec<Record>) -> Result<ReportResult> {
        let stats = stats::aggregate(&records);
        tracing::debug!(
            "Aggregated {} records ({} unique titles, {} duplicates)",
            stats.total,
            stats.unique_titles,
            stats.duplicate_titles.len()
        );

        let report = report::render(&stats, self.clock.today());

        Ok(ReportResult {
            records,
            stats,
            report,
        })
    }

    async fn load(&self, result: ReportResult) -> Result<String> {
        let filename = self.config.report_filename();

        tracing::debug!(
            "Writing report ({} bytes) to storage",
            result.report.len()
        );
        self.storage
            .write_file(filename, result.report.as_bytes())
            .await?;

        Ok(format!("{}/{}", self.config.output_path(), filename))
    }
}
