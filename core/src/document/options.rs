use crate::prelude::DataAxis;
use serde::{Deserialize, Serialize};

/// Display options read by the viewer. Field names are part of the
/// document format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FigureOptions {
    pub compact: bool,
    pub time_unit: String,
    pub x_unit: String,
    pub y_unit: String,
    pub t_axis: Option<Vec<f64>>,
    pub x_axis: Option<Vec<f64>>,
    pub y_axis: Option<Vec<f64>>,
    pub x_bins: Option<usize>,
    pub y_bins: Option<usize>,
    pub max_points: Option<usize>,
    pub max_intensity: Option<f64>,
    pub min_intensity: Option<f64>,
    pub width: u32,
    pub height: u32,
    pub margin: u32,
    pub timesteps: usize,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub t_label: String,
    pub x_label: String,
    pub y_label: String,
    #[serde(rename = "loop")]
    pub looped: bool,
}

impl Default for FigureOptions {
    fn default() -> Self {
        Self {
            compact: false,
            time_unit: String::new(),
            x_unit: String::new(),
            y_unit: String::new(),
            t_axis: None,
            x_axis: None,
            y_axis: None,
            x_bins: None,
            y_bins: None,
            max_points: None,
            max_intensity: None,
            min_intensity: None,
            width: 600,
            height: 600,
            margin: 40,
            timesteps: 1,
            t_label: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            looped: false,
        }
    }
}

impl FigureOptions {
    pub fn ticks(&self, axis: DataAxis) -> Option<&[f64]> {
        match axis {
            DataAxis::T => self.t_axis.as_deref(),
            DataAxis::X => self.x_axis.as_deref(),
            DataAxis::Y => self.y_axis.as_deref(),
        }
    }

    pub(crate) fn ticks_mut(&mut self, axis: DataAxis) -> &mut Option<Vec<f64>> {
        match axis {
            DataAxis::T => &mut self.t_axis,
            DataAxis::X => &mut self.x_axis,
            DataAxis::Y => &mut self.y_axis,
        }
    }

    pub fn unit(&self, axis: DataAxis) -> &str {
        match axis {
            DataAxis::T => &self.time_unit,
            DataAxis::X => &self.x_unit,
            DataAxis::Y => &self.y_unit,
        }
    }

    pub(crate) fn unit_mut(&mut self, axis: DataAxis) -> &mut String {
        match axis {
            DataAxis::T => &mut self.time_unit,
            DataAxis::X => &mut self.x_unit,
            DataAxis::Y => &mut self.y_unit,
        }
    }

    pub fn label(&self, axis: DataAxis) -> &str {
        match axis {
            DataAxis::T => &self.t_label,
            DataAxis::X => &self.x_label,
            DataAxis::Y => &self.y_label,
        }
    }

    pub(crate) fn label_mut(&mut self, axis: DataAxis) -> &mut String {
        match axis {
            DataAxis::T => &mut self.t_label,
            DataAxis::X => &mut self.x_label,
            DataAxis::Y => &mut self.y_label,
        }
    }
}
