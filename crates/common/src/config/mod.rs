//! Configuration management for Bibliosynth
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config/default.toml, config/{APP_ENV}.toml, config/local.toml)
//! - Default values
//!
//! Every loaded configuration is checked with `validator` before use.

use chrono::Datelike;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::{Validate, ValidationError};

use crate::errors::Result;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct AppConfig {
    /// Corpus generation parameters
    #[serde(default)]
    #[validate(nested)]
    pub generator: GeneratorConfig,

    /// Artifact locations and report options
    #[serde(default)]
    #[validate(nested)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[validate(schema(function = "validate_generator"))]
pub struct GeneratorConfig {
    /// Size of the researcher pool
    #[serde(default = "default_researcher_count")]
    #[validate(range(min = 1, message = "researcher_count must be positive"))]
    pub researcher_count: usize,

    /// Number of publications to generate
    #[serde(default = "default_publication_count")]
    #[validate(range(min = 1, message = "publication_count must be positive"))]
    pub publication_count: usize,

    /// Seed for the corpus RNG
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Anchor year for the citation age skew
    #[serde(default = "default_current_year")]
    pub current_year: i32,

    /// Lower bound for researcher career starts
    #[serde(default = "default_earliest_career_start")]
    pub earliest_career_start: i32,

    /// Maximum number of authors per publication
    #[serde(default = "default_max_authors")]
    #[validate(range(min = 1, max = 5))]
    pub max_authors: usize,

    /// Probability that an extra author is drawn from existing collaborators
    #[serde(default = "default_clustering_bias")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub clustering_bias: f64,

    /// Expected citations per year of publication age
    #[serde(default = "default_citation_rate")]
    #[validate(range(exclusive_min = 0.0))]
    pub citation_rate: f64,

    /// Discipline catalog with per-discipline journals
    #[serde(default = "default_disciplines")]
    #[validate(length(min = 1, message = "discipline catalog must not be empty"), nested)]
    pub disciplines: Vec<DisciplineConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Validate)]
pub struct DisciplineConfig {
    #[validate(length(min = 1))]
    pub name: String,

    /// Relative sampling weight for researcher assignment
    #[serde(default = "default_weight")]
    #[validate(range(min = 0.0))]
    pub weight: f64,

    #[validate(length(min = 1, message = "journal catalog must not be empty"))]
    pub journals: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct OutputConfig {
    /// Root directory for data, reports and plots
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// Number of researchers listed in the ranking
    #[serde(default = "default_top_n")]
    #[validate(range(min = 1))]
    pub top_n: usize,

    /// Render chart images
    #[serde(default = "default_render_plots")]
    pub render_plots: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default = "default_json_logging")]
    pub json_logging: bool,
}

// Default value functions
fn default_researcher_count() -> usize { 100 }
fn default_publication_count() -> usize { 1000 }
fn default_seed() -> u64 { 42 }
fn default_current_year() -> i32 { chrono::Utc::now().year() }
fn default_earliest_career_start() -> i32 { 1980 }
fn default_max_authors() -> usize { 5 }
fn default_clustering_bias() -> f64 { 0.6 }
fn default_citation_rate() -> f64 { 4.0 }
fn default_weight() -> f64 { 1.0 }
fn default_output_dir() -> PathBuf { PathBuf::from("output") }
fn default_top_n() -> usize { 10 }
fn default_render_plots() -> bool { true }
fn default_log_level() -> String { "info".to_string() }
fn default_json_logging() -> bool { false }

fn discipline(name: &str, journals: &[&str]) -> DisciplineConfig {
    DisciplineConfig {
        name: name.to_string(),
        weight: default_weight(),
        journals: journals.iter().map(|j| j.to_string()).collect(),
    }
}

/// Built-in discipline and journal catalog
pub fn default_disciplines() -> Vec<DisciplineConfig> {
    vec![
        discipline(
            "Physics",
            &["Physical Review Letters", "Journal of Applied Physics", "Annals of Physics"],
        ),
        discipline(
            "Biology",
            &["Cell Reports", "Journal of Molecular Biology", "PLOS Biology"],
        ),
        discipline(
            "Chemistry",
            &["Journal of the American Chemical Society", "Chemical Science", "Organic Letters"],
        ),
        discipline(
            "Computer Science",
            &["Communications of the ACM", "Journal of Machine Learning Research", "IEEE Transactions on Software Engineering"],
        ),
        discipline(
            "Mathematics",
            &["Annals of Mathematics", "Inventiones Mathematicae", "Journal of Number Theory"],
        ),
        discipline(
            "Economics",
            &["American Economic Review", "Econometrica", "Journal of Political Economy"],
        ),
    ]
}

fn validate_generator(config: &GeneratorConfig) -> std::result::Result<(), ValidationError> {
    if config.earliest_career_start > config.current_year {
        let mut err = ValidationError::new("career_window");
        err.message = Some("earliest_career_start must not be after current_year".into());
        return Err(err);
    }
    // Range rules pass NaN through, so finiteness is checked here
    if !config.clustering_bias.is_finite() {
        let mut err = ValidationError::new("clustering_bias");
        err.message = Some("clustering_bias must be a finite number".into());
        return Err(err);
    }
    if !config.citation_rate.is_finite() {
        let mut err = ValidationError::new("citation_rate");
        err.message = Some("citation_rate must be a finite number".into());
        return Err(err);
    }
    if let Some(d) = config.disciplines.iter().find(|d| !d.weight.is_finite()) {
        let mut err = ValidationError::new("discipline_weights");
        err.message = Some(format!("weight of discipline {} must be a finite number", d.name).into());
        return Err(err);
    }
    if !config.disciplines.is_empty() && config.disciplines.iter().all(|d| d.weight <= 0.0) {
        let mut err = ValidationError::new("discipline_weights");
        err.message = Some("at least one discipline weight must be positive".into());
        return Err(err);
    }
    Ok(())
}

impl AppConfig {
    /// Load configuration from environment and files
    pub fn load() -> Result<Self> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Load base config file
            .add_source(File::with_name("config/default").required(false))
            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            // Load local overrides
            .add_source(File::with_name("config/local").required(false))
            // Load from environment variables with APP__ prefix
            // e.g., APP__GENERATOR__SEED=7
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Load from a specific config file, still honouring APP__ overrides
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Directory for the corpus tables
    pub fn data_dir(&self) -> PathBuf {
        self.output.dir.join("data")
    }

    /// Directory for text and JSON reports
    pub fn reports_dir(&self) -> PathBuf {
        self.output.dir.join("reports")
    }

    /// Directory for chart images
    pub fn plots_dir(&self) -> PathBuf {
        self.output.dir.join("plots")
    }

    /// Validate all sections, mapping failures to configuration errors
    pub fn check(&self) -> Result<()> {
        self.validate()?;
        Ok(())
    }
}

impl GeneratorConfig {
    /// Validate generation parameters alone
    pub fn check(&self) -> Result<()> {
        self.validate()?;
        Ok(())
    }

    /// Look up a discipline by name
    pub fn discipline(&self, name: &str) -> Option<&DisciplineConfig> {
        self.disciplines.iter().find(|d| d.name == name)
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            researcher_count: default_researcher_count(),
            publication_count: default_publication_count(),
            seed: default_seed(),
            current_year: default_current_year(),
            earliest_career_start: default_earliest_career_start(),
            max_authors: default_max_authors(),
            clustering_bias: default_clustering_bias(),
            citation_rate: default_citation_rate(),
            disciplines: default_disciplines(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            top_n: default_top_n(),
            render_plots: default_render_plots(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logging: default_json_logging(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            output: OutputConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}
