use crate::adapters::csv_history::{supported_suffixes, CsvHistory};
use crate::config::toml_config::TomlConfig;
use crate::config::OutputFormat;
use crate::core::generator::DEFAULT_MAX_ATTEMPTS;
use crate::core::ConfigProvider;
use crate::domain::format::LotoKind;
use crate::utils::error::{LotoError, Result};
use crate::utils::validation::{self, Validate};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "loto")]
#[command(version)]
#[command(about = "Generate lottery draws that were never drawn, or check one against the history")]
pub struct CliConfig {
    #[arg(short, long, help = "Directory holding history files")]
    pub repository: Option<PathBuf>,

    #[arg(short, long, help = "History file, may be repeated")]
    pub file: Vec<PathBuf>,

    #[arg(short, long, value_enum, help = "Lottery game [default: 5_boules]")]
    pub loto_format: Option<LotoKind>,

    #[arg(short, long, value_name = "DRAW", help = "Check this draw (e.g. 1-2-3-4-5+6) instead of generating one")]
    pub exist: Option<String>,

    #[arg(short, long, help = "TOML settings file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Seed for reproducible generation")]
    pub seed: Option<u64>,

    #[arg(long, help = "Give up generation after this many draws already seen")]
    pub max_attempts: Option<usize>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Fills every option left unset on the command line from `file`.
    pub fn merge(mut self, file: TomlConfig) -> Self {
        if self.repository.is_none() && self.file.is_empty() {
            self.repository = file.history.repository;
            self.file = file.history.files;
        }
        self.loto_format = self.loto_format.or(file.generation.format);
        self.max_attempts = self.max_attempts.or(file.generation.max_attempts);
        self.seed = self.seed.or(file.generation.seed);
        self
    }

    /// Loads and merges `--config` when given.
    pub fn resolve(self) -> Result<Self> {
        let Some(path) = self.config.clone() else {
            return Ok(self);
        };
        tracing::debug!("Loading settings from {}", path.display());
        let file = TomlConfig::from_file(&path)?;
        file.validate()?;
        Ok(self.merge(file))
    }

    pub fn history(&self) -> Result<CsvHistory> {
        match &self.repository {
            Some(dir) => CsvHistory::from_repository(dir),
            None => Ok(CsvHistory::from_files(self.file.clone())),
        }
    }
}

impl ConfigProvider for CliConfig {
    fn loto_kind(&self) -> LotoKind {
        self.loto_format.unwrap_or_default()
    }

    fn exist(&self) -> Option<&str> {
        self.exist.as_deref()
    }

    fn max_attempts(&self) -> usize {
        self.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS)
    }

    fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        match (&self.repository, self.file.is_empty()) {
            (Some(_), false) => {
                return Err(LotoError::usage(
                    "--repository and --file can't be set simultaneously",
                ))
            }
            (None, true) => {
                return Err(LotoError::usage("one of --repository or --file should be set"))
            }
            _ => {}
        }

        if let Some(dir) = &self.repository {
            validation::validate_existing_dir("--repository", dir)?;
        }

        validation::validate_file_suffixes("--file", &self.file, &supported_suffixes())?;
        for file in &self.file {
            validation::validate_existing_file("--file", file)?;
        }

        if let Some(max_attempts) = self.max_attempts {
            validation::validate_positive_number("--max-attempts", max_attempts, 1)?;
        }

        Ok(())
    }
}
