use crate::core::Pipeline;
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::monitor::SystemMonitor;

pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
    #[cfg(feature = "cli")]
    monitor: Option<SystemMonitor>,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            #[cfg(feature = "cli")]
            monitor: None,
        }
    }

    #[cfg(feature = "cli")]
    pub fn new_with_monitoring(pipeline: P, enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: enabled.then(SystemMonitor::new),
        }
    }

    pub async fn run(&self) -> Result<String> {
        println!("Starting catalog report generation...");

        // Extract
        println!("Extracting records...");
        let records = self.pipeline.extract().await?;
        println!("Extracted {} records", records.len());

        // Transform
        println!("Computing statistics...");
        let result = self.pipeline.transform(records).await?;
        println!("Aggregated {} records", result.stats.total);

        // Load
        println!("Writing report...");
        let output_path = self.pipeline.load(result).await?;
        println!("Report saved to: {}", output_path);

        #[cfg(feature = "cli")]
        self.log_resource_usage();

        Ok(output_path)
    }

    #[cfg(feature = "cli")]
    fn log_resource_usage(&self) {
        if let Some(stats) = self.monitor.as_ref().and_then(|m| m.stats()) {
            tracing::info!(
                "Resource usage: cpu {:.1}%, memory {} MB (peak {} MB), elapsed {:.2?}",
                stats.cpu_usage,
                stats.memory_usage_mb,
                stats.peak_memory_mb,
                stats.elapsed_time
            );
        }
    }
}
