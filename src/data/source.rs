use std::path::PathBuf;

use super::loader;
use super::model::{Dataset, Species};
use super::sample;
use crate::error::{DashError, Result};

/// Supplies the penguin table once, at startup.
pub trait DatasetSource {
    fn load(&self) -> Result<Dataset>;

    /// Human-readable origin, for logs and the title bar.
    fn describe(&self) -> String;
}

/// A `.csv`, `.json` or `.parquet` file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    pub path: PathBuf,
}

impl DatasetSource for FileSource {
    fn load(&self) -> Result<Dataset> {
        loader::load_file(&self.path).map_err(|e| DashError::InvalidInput(format!("{e:#}")))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Deterministic generated data, used when no file is configured.
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    pub seed: u64,
    pub counts: Vec<(Species, usize)>,
}

impl SyntheticSource {
    pub fn new(seed: u64) -> Self {
        SyntheticSource {
            seed,
            counts: sample::DEFAULT_COUNTS.to_vec(),
        }
    }
}

impl DatasetSource for SyntheticSource {
    fn load(&self) -> Result<Dataset> {
        let ds = sample::generate(self.seed, &self.counts);
        log::info!("Generated {} synthetic penguins (seed {})", ds.len(), self.seed);
        Ok(ds)
    }

    fn describe(&self) -> String {
        format!("synthetic sample (seed {})", self.seed)
    }
}
