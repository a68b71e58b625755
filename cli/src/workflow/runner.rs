use crate::generator::profile::build_datacube;
use crate::workflow::config::FigureConfig;
use crate::workflow::input::load_datacube;
use anyhow::Context;
use ndarray::Array3;
use std::path::PathBuf;
use swanplot::{Axes, DataAxis};

pub struct WorkflowResult {
    pub output: PathBuf,
    pub timesteps: usize,
    pub x_bins: usize,
    pub y_bins: usize,
    pub min_intensity: f64,
    pub max_intensity: f64,
}

#[derive(Clone)]
pub struct Runner {
    config: FigureConfig,
}

impl Runner {
    pub fn new(config: FigureConfig) -> Self {
        Self { config }
    }

    /// Reads the input cube, or generates one when no input is configured.
    pub fn datacube(&self) -> anyhow::Result<Array3<f64>> {
        match &self.config.input {
            Some(path) => load_datacube(path),
            None => build_datacube(&self.config.generator).context("generating datacube"),
        }
    }

    /// Loads the cube into a fresh figure and applies the configured styling.
    pub fn build_axes(&self, datacube: &Array3<f64>) -> anyhow::Result<Axes> {
        let mut axes = Axes::new();
        axes.hist(datacube).context("loading histogram")?;

        for axis in DataAxis::ALL {
            let settings = self.config.axes.get(axis);
            if let Some(label) = &settings.label {
                axes.set_label(label.as_str(), axis);
            }
            if let Some(unit) = &settings.unit {
                axes.set_unit(unit.as_str(), axis);
            }
            if let Some(ticks) = &settings.ticks {
                axes.custom_ticks(ticks.clone(), axis)
                    .with_context(|| format!("setting ticks for axis {}", axis))?;
            } else if let Some([start, end]) = settings.range {
                axes.uniform_ticks(start, end, axis)
                    .with_context(|| format!("setting range for axis {}", axis))?;
            }
        }

        if let Some(cmap) = &self.config.cmap {
            axes.cmap(cmap.colors.clone(), cmap.positions.clone())
                .context("building colormap")?;
        }
        if self.config.width.is_some() || self.config.height.is_some() {
            let current = axes.options();
            let width = self.config.width.unwrap_or(current.width);
            let height = self.config.height.unwrap_or(current.height);
            axes.set_size(width, height).context("setting figure size")?;
        }
        if let Some(margin) = self.config.margin {
            axes.set_margin(margin);
        }
        axes.set_loop(self.config.looped);

        Ok(axes)
    }

    pub fn execute(&self) -> anyhow::Result<WorkflowResult> {
        let datacube = self.datacube()?;
        let axes = self.build_axes(&datacube)?;

        if let Some(parent) = self.config.output.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }
        axes.savefig(&self.config.output, &self.config.save)
            .with_context(|| format!("saving figure to {}", self.config.output.display()))?;

        let options = axes.options();
        Ok(WorkflowResult {
            output: self.config.output.clone(),
            timesteps: options.timesteps,
            x_bins: options.x_bins.unwrap_or_default(),
            y_bins: options.y_bins.unwrap_or_default(),
            min_intensity: options.min_intensity.unwrap_or_default(),
            max_intensity: options.max_intensity.unwrap_or_default(),
        })
    }
}
