use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_REPORT_FILENAME: &str = "catalog_report.md";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    pub source: SourceConfig,
    pub report: ReportConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// HTML document containing the catalog block.
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub output_path: String,
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${REPORT_DIR})
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").expect("env var pattern");

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn report_filename(&self) -> &str {
        self.report
            .filename
            .as_deref()
            .unwrap_or(DEFAULT_REPORT_FILENAME)
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn source_path(&self) -> &str {
        &self.source.path
    }

    fn output_path(&self) -> &str {
        &self.report.output_path
    }

    fn report_filename(&self) -> &str {
        self.report_filename()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("pipeline.name", &self.pipeline.name)?;
        validation::validate_path("source.path", &self.source.path)?;
        validation::validate_file_extensions(
            "source.path",
            &[self.source.path.clone()],
            &["html", "htm"],
        )?;
        validation::validate_path("report.output_path", &self.report.output_path)?;
        validation::validate_non_empty_string("report.filename", self.report_filename())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC_CONFIG: &str = r#"
[pipeline]
name = "catalog-report"
description = "Game catalog report"
version = "1.0.0"

[source]
path = "src/index.html"

[report]
output_path = "./reports"
"#;

    #[test]
    fn test_parse_basic_toml_config() {
        let config = TomlConfig::from_toml_str(BASIC_CONFIG).unwrap();

        assert_eq!(config.pipeline.name, "catalog-report");
        assert_eq!(config.source.path, "src/index.html");
        assert_eq!(config.report.output_path, "./reports");
        assert_eq!(config.report_filename(), "catalog_report.md");
        assert!(!config.monitoring_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_explicit_filename_and_monitoring() {
        let content = format!(
            "{}filename = \"weekly.md\"\n\n[monitoring]\nenabled = true\n",
            BASIC_CONFIG
        );
        let config = TomlConfig::from_toml_str(&content).unwrap();

        assert_eq!(config.report_filename(), "weekly.md");
        assert!(config.monitoring_enabled());
    }

    #[test]
    fn test_missing_section_is_an_error() {
        let content = "[pipeline]\nname = \"x\"\ndescription = \"\"\nversion = \"1\"\n";
        assert!(TomlConfig::from_toml_str(content).is_err());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CATALOG_TEST_DIR", "/tmp/reports");
        let content = BASIC_CONFIG.replace("./reports", "${CATALOG_TEST_DIR}");
        let config = TomlConfig::from_toml_str(&content).unwrap();

        assert_eq!(config.report.output_path, "/tmp/reports");
        std::env::remove_var("CATALOG_TEST_DIR");
    }

    #[test]
    fn test_unknown_env_var_is_left_as_is() {
        let content = BASIC_CONFIG.replace("./reports", "${CATALOG_NO_SUCH_VAR}");
        let config = TomlConfig::from_toml_str(&content).unwrap();

        assert_eq!(config.report.output_path, "${CATALOG_NO_SUCH_VAR}");
    }

    #[test]
    fn test_non_html_source_fails_validation() {
        let content = BASIC_CONFIG.replace("src/index.html", "src/data.json");
        let config = TomlConfig::from_toml_str(&content).unwrap();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", BASIC_CONFIG).unwrap();

        let config = TomlConfig::from_file(file.path()).unwrap();
        assert_eq!(config.pipeline.name, "catalog-report");
    }

    #[test]
    fn test_from_missing_file_is_io_error() {
        let result = TomlConfig::from_file("definitely/not/here.toml");
        assert!(result.is_err());
    }
}
