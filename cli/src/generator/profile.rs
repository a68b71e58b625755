use crate::generator::template::{gaussian_frame, ramp_frame};
use anyhow::{ensure, Context};
use ndarray::{s, Array2, Array3};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Configuration for generating a synthetic `(t, x, y)` intensity cube.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub timesteps: usize,
    pub x_bins: usize,
    pub y_bins: usize,
    /// Bins the pattern rolls along x per timestep.
    pub shift: usize,
    pub peak: f64,
    pub sigma: f64,
    pub gradient: f64,
    pub noise: f64,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            timesteps: 20,
            x_bins: 64,
            y_bins: 64,
            shift: 1,
            peak: 200.0,
            sigma: 6.0,
            gradient: 40.0,
            noise: 5.0,
            seed: 0,
        }
    }
}

impl GeneratorConfig {
    pub fn with_shape(timesteps: usize, x_bins: usize, y_bins: usize) -> Self {
        Self {
            timesteps,
            x_bins,
            y_bins,
            ..Default::default()
        }
    }

    fn base_frame(&self) -> Array2<f64> {
        let centre = (self.x_bins as f64 / 4.0, self.y_bins as f64 / 2.0);
        gaussian_frame(self.x_bins, self.y_bins, centre, self.sigma, self.peak)
            + ramp_frame(self.x_bins, self.y_bins, self.gradient)
    }
}

/// Rotates rows so that row `i` moves to `(i + shift) % rows`.
fn roll_rows(frame: &Array2<f64>, shift: usize) -> Array2<f64> {
    let rows = frame.nrows();
    if rows == 0 {
        return frame.clone();
    }
    let shift = shift % rows;
    let mut rolled = Array2::zeros(frame.raw_dim());
    rolled
        .slice_mut(s![shift.., ..])
        .assign(&frame.slice(s![..rows - shift, ..]));
    rolled
        .slice_mut(s![..shift, ..])
        .assign(&frame.slice(s![rows - shift.., ..]));
    rolled
}

/// Builds the cube: a Gaussian bump over a gradient, rolled along x once per
/// timestep, with seeded uniform noise on top.
pub fn build_datacube(config: &GeneratorConfig) -> anyhow::Result<Array3<f64>> {
    ensure!(
        config.timesteps > 0 && config.x_bins > 0 && config.y_bins > 0,
        "generator shape ({}, {}, {}) must be non-empty",
        config.timesteps,
        config.x_bins,
        config.y_bins
    );
    ensure!(
        [config.peak, config.sigma, config.gradient, config.noise]
            .iter()
            .all(|v| v.is_finite()),
        "generator peak, sigma, gradient and noise must be finite"
    );
    ensure!(
        config.noise >= 0.0,
        "generator noise {} must not be negative",
        config.noise
    );
    config
        .timesteps
        .checked_mul(config.x_bins)
        .and_then(|n| n.checked_mul(config.y_bins))
        .context("overflow computing sample count for generator")?;

    let base = config.base_frame();
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut cube = Array3::zeros((config.timesteps, config.x_bins, config.y_bins));

    for (t, mut slice) in cube.outer_iter_mut().enumerate() {
        let rolled = roll_rows(&base, t.saturating_mul(config.shift));
        slice.assign(&rolled);
        if config.noise > 0.0 {
            slice.mapv_inplace(|value| value + rng.gen_range(0.0..config.noise));
        }
    }

    Ok(cube)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_builds_requested_shape() {
        let cube = build_datacube(&GeneratorConfig::with_shape(4, 8, 6)).unwrap();
        assert_eq!(cube.dim(), (4, 8, 6));
        assert!(cube.iter().all(|v| *v >= 0.0));
    }

    #[test]
    fn frames_roll_along_x() {
        let config = GeneratorConfig {
            noise: 0.0,
            shift: 2,
            ..GeneratorConfig::with_shape(3, 8, 4)
        };
        let cube = build_datacube(&config).unwrap();
        assert_eq!(cube[[1, 2, 3]], cube[[0, 0, 3]]);
        assert_eq!(cube[[2, 1, 0]], cube[[0, 5, 0]]);
    }

    #[test]
    fn seed_makes_noise_repeatable() {
        let config = GeneratorConfig::with_shape(2, 4, 4);
        assert_eq!(
            build_datacube(&config).unwrap(),
            build_datacube(&config).unwrap()
        );
    }

    #[test]
    fn empty_shape_is_rejected() {
        assert!(build_datacube(&GeneratorConfig::with_shape(0, 4, 4)).is_err());
    }

    #[test]
    fn non_finite_parameters_are_rejected() {
        let infinite_noise = GeneratorConfig {
            noise: f64::INFINITY,
            ..GeneratorConfig::with_shape(2, 4, 4)
        };
        let err = build_datacube(&infinite_noise).unwrap_err();
        assert!(err.to_string().contains("finite"));

        let nan_sigma = GeneratorConfig {
            sigma: f64::NAN,
            ..GeneratorConfig::with_shape(2, 4, 4)
        };
        assert!(build_datacube(&nan_sigma).is_err());

        let negative_noise = GeneratorConfig {
            noise: -1.0,
            ..GeneratorConfig::with_shape(2, 4, 4)
        };
        assert!(build_datacube(&negative_noise).is_err());
    }

    #[test]
    fn roll_wraps_rows() {
        let frame = Array2::from_shape_vec((3, 1), vec![1.0, 2.0, 3.0]).unwrap();
        let rolled = roll_rows(&frame, 4);
        assert_eq!(rolled.column(0).to_vec(), vec![3.0, 1.0, 2.0]);
    }
}
