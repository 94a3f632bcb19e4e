use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::histogram::Variable;
use crate::data::model::Species;
use crate::data::source::{DatasetSource, FileSource, SyntheticSource};
use crate::error::DashError;

/// Path of an optional JSON config file.
pub const CONFIG_ENV: &str = "PENGUIN_DASH_CONFIG";
/// Overrides `data_path` from the config file.
pub const DATA_ENV: &str = "PENGUIN_DASH_DATA";
/// Upper limit on `histogram_bins`; every bin is allocated up front.
pub const MAX_HISTOGRAM_BINS: usize = 1000;

/// Which chart the central card shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    #[default]
    Histogram,
    Scatter,
}

impl ChartKind {
    pub const ALL: [ChartKind; 2] = [ChartKind::Histogram, ChartKind::Scatter];

    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Histogram => "Histogram",
            ChartKind::Scatter => "Bill length vs depth",
        }
    }
}

/// Range and starting value of the body-mass slider, in grams.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MassSlider {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl Default for MassSlider {
    fn default() -> Self {
        MassSlider {
            min: 2000.0,
            max: 6000.0,
            default: 6000.0,
        }
    }
}

impl MassSlider {
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

impl Link {
    fn new(label: &str, url: &str) -> Self {
        Link {
            label: label.to_string(),
            url: url.to_string(),
        }
    }
}

/// Dashboard settings. Every field has a default, so a config file only
/// needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub title: String,
    /// Data file to load; `None` generates a synthetic sample.
    pub data_path: Option<PathBuf>,
    pub sample_seed: u64,
    pub mass_slider: MassSlider,
    /// Species offered (and initially selected) in the sidebar.
    pub species: Vec<Species>,
    pub chart: ChartKind,
    pub histogram_variable: Variable,
    pub histogram_bins: usize,
    pub links: Vec<Link>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            title: "Penguins Dashboard".to_string(),
            data_path: None,
            sample_seed: 42,
            mass_slider: MassSlider::default(),
            species: Species::ALL.to_vec(),
            chart: ChartKind::default(),
            histogram_variable: Variable::BillLength,
            histogram_bins: 20,
            links: vec![
                Link::new("palmerpenguins", "https://allisonhorst.github.io/palmerpenguins/"),
                Link::new("egui", "https://www.egui.rs/"),
                Link::new("egui_plot", "https://docs.rs/egui_plot"),
            ],
        }
    }
}

impl DashboardConfig {
    /// Parse a JSON config file and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_json(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: DashboardConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults, overlaid by the file named in `PENGUIN_DASH_CONFIG` and
    /// then by `PENGUIN_DASH_DATA`.
    pub fn from_env() -> Result<Self> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path))?,
            None => Self::default(),
        };
        if let Some(data) = std::env::var_os(DATA_ENV) {
            config.data_path = Some(PathBuf::from(data));
        }
        Ok(config)
    }

    pub fn validate(&self) -> std::result::Result<(), DashError> {
        let s = &self.mass_slider;
        if !(s.min.is_finite() && s.max.is_finite() && s.min < s.max) {
            return Err(DashError::InvalidConfig(format!(
                "mass slider range [{}, {}] is empty",
                s.min, s.max
            )));
        }
        if !(s.min..=s.max).contains(&s.default) {
            return Err(DashError::InvalidConfig(format!(
                "mass slider default {} outside [{}, {}]",
                s.default, s.min, s.max
            )));
        }
        if !(1..=MAX_HISTOGRAM_BINS).contains(&self.histogram_bins) {
            return Err(DashError::InvalidConfig(format!(
                "histogram_bins {} outside [1, {MAX_HISTOGRAM_BINS}]",
                self.histogram_bins
            )));
        }
        if self.species.is_empty() {
            return Err(DashError::InvalidConfig("species list is empty".into()));
        }
        Ok(())
    }

    /// The dataset collaborator this config asks for.
    pub fn dataset_source(&self) -> Box<dyn DatasetSource> {
        match &self.data_path {
            Some(path) => Box::new(FileSource { path: path.clone() }),
            None => Box::new(SyntheticSource::new(self.sample_seed)),
        }
    }
}
