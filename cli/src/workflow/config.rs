use crate::generator::profile::GeneratorConfig;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use swanplot::{DataAxis, SaveOptions};

/// Label, unit and tick settings for one data axis.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AxisConfig {
    pub label: Option<String>,
    pub unit: Option<String>,
    /// Start and end of evenly spaced ticks.
    pub range: Option<[f64; 2]>,
    /// Explicit ticks; wins over `range`.
    pub ticks: Option<Vec<f64>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AxesConfig {
    pub t: AxisConfig,
    pub x: AxisConfig,
    pub y: AxisConfig,
}

impl AxesConfig {
    pub fn get(&self, axis: DataAxis) -> &AxisConfig {
        match axis {
            DataAxis::T => &self.t,
            DataAxis::X => &self.x,
            DataAxis::Y => &self.y,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CmapConfig {
    pub colors: Vec<String>,
    pub positions: Vec<f64>,
}

/// Everything needed to produce one figure document.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FigureConfig {
    pub output: PathBuf,
    pub save: SaveOptions,
    #[serde(rename = "loop")]
    pub looped: bool,
    pub cmap: Option<CmapConfig>,
    pub axes: AxesConfig,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub margin: Option<u32>,
    /// JSON file holding a nested `[t][x][y]` array; replaces the generator.
    pub input: Option<PathBuf>,
    pub generator: GeneratorConfig,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("test.json"),
            save: SaveOptions::default(),
            looped: false,
            cmap: None,
            axes: AxesConfig::default(),
            width: None,
            height: None,
            margin: None,
            input: None,
            generator: GeneratorConfig::default(),
        }
    }
}

impl FigureConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading figure config {}", path_ref.display()))?;
        let config: FigureConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing figure config {}", path_ref.display()))?;
        Ok(config)
    }

    /// Replaces the generator settings that were given on the command line.
    pub fn override_generator(
        &mut self,
        timesteps: Option<usize>,
        x_bins: Option<usize>,
        y_bins: Option<usize>,
        seed: Option<u64>,
    ) {
        let generator = &mut self.generator;
        if let Some(timesteps) = timesteps {
            generator.timesteps = timesteps;
        }
        if let Some(x_bins) = x_bins {
            generator.x_bins = x_bins;
        }
        if let Some(y_bins) = y_bins {
            generator.y_bins = y_bins;
        }
        if let Some(seed) = seed {
            generator.seed = seed;
        }
    }

    #[cfg(test)]
    pub fn from_args(timesteps: usize, x_bins: usize, y_bins: usize, seed: u64) -> Self {
        Self {
            generator: GeneratorConfig {
                seed,
                ..GeneratorConfig::with_shape(timesteps, x_bins, y_bins)
            },
            ..Default::default()
        }
    }
}
