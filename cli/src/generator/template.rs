use ndarray::Array2;

/// Flat `0..rows*cols` ramp reshaped into a `(rows, cols)` frame and scaled
/// so its largest entry equals `height`.
pub fn ramp_frame(rows: usize, cols: usize, height: f64) -> Array2<f64> {
    let len = rows * cols;
    let scale = if len > 1 { height / (len - 1) as f64 } else { 0.0 };
    let flat: Vec<f64> = (0..len).map(|i| i as f64 * scale).collect();
    Array2::from_shape_vec((rows, cols), flat).unwrap_or_else(|_| Array2::zeros((rows, cols)))
}

/// Isotropic Gaussian bump centred on `(centre_row, centre_col)`.
pub fn gaussian_frame(
    rows: usize,
    cols: usize,
    centre: (f64, f64),
    sigma: f64,
    peak: f64,
) -> Array2<f64> {
    let denom = 2.0 * sigma.max(f64::EPSILON).powi(2);
    Array2::from_shape_fn((rows, cols), |(r, c)| {
        let dr = r as f64 - centre.0;
        let dc = c as f64 - centre.1;
        peak * (-(dr * dr + dc * dc) / denom).exp()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_is_row_major() {
        let frame = ramp_frame(2, 3, 5.0);
        assert_eq!(frame[[0, 0]], 0.0);
        assert_eq!(frame[[0, 2]], 2.0);
        assert_eq!(frame[[1, 2]], 5.0);
    }

    #[test]
    fn gaussian_peaks_at_centre() {
        let frame = gaussian_frame(5, 5, (2.0, 2.0), 1.0, 100.0);
        assert_eq!(frame[[2, 2]], 100.0);
        assert!(frame[[0, 0]] < frame[[1, 1]]);
    }
}
