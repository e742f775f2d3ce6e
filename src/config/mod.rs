pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "catalog-report")]
#[command(about = "Generates an aggregate markdown report from the game catalog embedded in an HTML page")]
pub struct CliConfig {
    /// HTML document containing the catalog block
    #[arg(long, default_value = "src/index.html")]
    pub source: String,

    /// Directory the report is written to
    #[arg(long, default_value = "./reports")]
    pub output_path: String,

    /// Report file name inside the output directory
    #[arg(long, default_value = "catalog_report.md")]
    pub report_filename: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log resource usage after the run")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn source_path(&self) -> &str {
        &self.source
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn report_filename(&self) -> &str {
        &self.report_filename
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("source", &self.source)?;
        validation::validate_file_extensions("source", &[self.source.clone()], &["html", "htm"])?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_non_empty_string("report_filename", &self.report_filename)?;
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    fn base_config() -> CliConfig {
        CliConfig {
            source: "src/index.html".to_string(),
            output_path: "./reports".to_string(),
            report_filename: "catalog_report.md".to_string(),
            verbose: false,
            monitor: false,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_non_html_source_is_rejected() {
        let mut config = base_config();
        config.source = "data.csv".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_report_filename_is_rejected() {
        let mut config = base_config();
        config.report_filename = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
