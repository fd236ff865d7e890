//! Core functionality for sampling image sequences.
//!
//! This library picks a subset of the images in a directory by capture time
//! and copies them into a destination with sequential, collision-free names:
//! - Capture-time resolution from EXIF or the file system
//! - Three sampling policies (every Nth, closest to a time of day, every Nth
//!   in a time window)
//! - Sequential naming that never reuses a number in the destination
//! - Safe copying that never overwrites

use log::info;
use std::path::PathBuf;

// -- Internal Modules --
mod error;

// -- Public Re-exports --
pub use config::*;
pub use error::{Error, Result};
pub use policy::{parse_time_of_day, SamplingPolicy};
pub use types::*;

// -- Public Modules --
pub mod config;
pub mod copier;
pub mod discovery;
pub mod logging;
pub mod naming;
pub mod policy;
pub mod safety;
pub mod selection;
pub mod timestamp;
pub mod types;

// -- Test Modules --
#[cfg(test)]
pub mod test_utils;

/// Main entry point for a sampling run
pub struct ImageSampler {
    config: Config,
}

impl ImageSampler {
    /// Create a new ImageSampler with the provided configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Select source images according to the configured policy
    pub fn select(&self) -> Result<Vec<PathBuf>> {
        selection::select(
            &self.config.source_dir,
            &self.config.policy,
            self.config.extensions,
        )
    }

    /// Output base name: the configured one, or one derived from the source
    pub fn base_name(&self) -> Result<String> {
        match &self.config.base_name {
            Some(base_name) => Ok(base_name.clone()),
            None => naming::default_base_name(&self.config.source_dir, self.config.extensions),
        }
    }

    /// Plan where `selection` would be copied, without writing anything
    pub fn plan(&self, selection: &[PathBuf]) -> Result<CopyReport> {
        copier::plan_copies(selection, &self.config.dest_dir, &self.base_name()?)
    }

    /// Copy `selection` into the destination with sequential names
    pub fn copy_and_rename(&self, selection: &[PathBuf]) -> Result<CopyReport> {
        copier::copy_and_rename(selection, &self.config.dest_dir, &self.base_name()?)
    }

    /// Run the full pipeline: select, then copy (or only plan on a dry run)
    pub fn run(&self) -> Result<CopyReport> {
        info!(
            "Sampling {} into {}",
            self.config.source_dir.display(),
            self.config.dest_dir.display()
        );
        let selected = self.select()?;

        if self.config.dry_run {
            info!("Dry run: planning {} copies", selected.len());
            self.plan(&selected)
        } else {
            self.copy_and_rename(&selected)
        }
    }
}
