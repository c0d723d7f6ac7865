//! Command-line arguments

use bibliosynth_common::config::AppConfig;
use bibliosynth_common::errors::Result;
use clap::Parser;
use std::path::PathBuf;

/// Generate a synthetic research corpus, compute bibliometrics and render a report
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "bibliosynth", version, about, long_about = None)]
pub struct Args {
    /// Number of researchers in the pool
    #[arg(long)]
    pub researchers: Option<usize>,

    /// Number of publications to generate
    #[arg(long)]
    pub publications: Option<usize>,

    /// RNG seed; the same seed reproduces the same tables
    #[arg(long)]
    pub seed: Option<u64>,

    /// Anchor year for citation aging (defaults to this year)
    #[arg(long)]
    pub current_year: Option<i32>,

    /// Configuration file, replacing the config/ directory lookup
    #[arg(long, env = "BIBLIOSYNTH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Root directory for data, reports and plots
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

impl Args {
    /// Load the layered configuration and apply command-line overrides last
    pub fn load_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::load()?,
        };
        self.apply(&mut config);
        Ok(config)
    }

    pub fn apply(&self, config: &mut AppConfig) {
        let generator = &mut config.generator;
        if let Some(n) = self.researchers {
            generator.researcher_count = n;
        }
        if let Some(n) = self.publications {
            generator.publication_count = n;
        }
        if let Some(seed) = self.seed {
            generator.seed = seed;
        }
        if let Some(year) = self.current_year {
            generator.current_year = year;
        }
        if let Some(dir) = &self.output_dir {
            config.output.dir = dir.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_overrides() {
        let args = Args::parse_from([
            "bibliosynth",
            "--researchers",
            "12",
            "--publications",
            "80",
            "--seed",
            "9",
            "--current-year",
            "2030",
            "--output-dir",
            "/tmp/run",
        ]);

        let mut config = AppConfig::default();
        args.apply(&mut config);

        assert_eq!(config.generator.researcher_count, 12);
        assert_eq!(config.generator.publication_count, 80);
        assert_eq!(config.generator.seed, 9);
        assert_eq!(config.generator.current_year, 2030);
        assert_eq!(config.output.dir, PathBuf::from("/tmp/run"));
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let args = Args::parse_from(["bibliosynth"]);
        let mut config = AppConfig::default();
        let before = config.generator.seed;
        args.apply(&mut config);
        assert_eq!(config.generator.seed, before);
    }

    #[test]
    fn test_rejects_non_numeric_count() {
        assert!(Args::try_parse_from(["bibliosynth", "--researchers", "many"]).is_err());
    }
}
