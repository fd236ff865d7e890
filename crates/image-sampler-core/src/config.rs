use log::LevelFilter;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::policy::SamplingPolicy;
use crate::types::SUPPORTED_EXTENSIONS;

/// Log level for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Level for a `-v` count: none is Info, one is Debug, more is Trace
    pub fn from_verbosity(verbose: u8) -> Self {
        match verbose {
            0 => Self::Info,
            1 => Self::Debug,
            _ => Self::Trace,
        }
    }

    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

/// Configuration for one sampling run
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory the images are sampled from
    pub source_dir: PathBuf,

    /// Directory the sampled images are copied into
    pub dest_dir: PathBuf,

    /// Output base name; derived from the first source image when unset
    pub base_name: Option<String>,

    /// How images are selected
    pub policy: SamplingPolicy,

    /// Lowercase extensions treated as images
    pub extensions: &'static [&'static str],

    /// Whether to plan the copies without making changes
    pub dry_run: bool,
}

impl Config {
    pub fn new(
        source_dir: impl Into<PathBuf>,
        dest_dir: impl Into<PathBuf>,
        policy: SamplingPolicy,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            dest_dir: dest_dir.into(),
            base_name: None,
            policy,
            extensions: SUPPORTED_EXTENSIONS,
            dry_run: false,
        }
    }

    pub fn with_base_name(mut self, base_name: impl Into<String>) -> Self {
        self.base_name = Some(base_name.into());
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.source_dir.exists() {
            return Err(Error::FileNotFound(self.source_dir.clone()));
        }
        if !self.source_dir.is_dir() {
            return Err(Error::NotADirectory(self.source_dir.clone()));
        }

        self.policy.validate()?;

        if let Some(base_name) = &self.base_name {
            if base_name.is_empty() {
                return Err(Error::Configuration(
                    "Base name must not be empty".to_string(),
                ));
            }
            if base_name.contains(std::path::is_separator) {
                return Err(Error::Configuration(format!(
                    "Base name must not contain a path separator: {}",
                    base_name
                )));
            }
        }

        Ok(())
    }
}
