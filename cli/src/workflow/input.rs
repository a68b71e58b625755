use anyhow::{bail, Context};
use ndarray::Array3;
use std::fs;
use std::path::Path;

/// Reads a nested `[t][x][y]` JSON array into a cube. Ragged input is an error.
pub fn load_datacube<P: AsRef<Path>>(path: P) -> anyhow::Result<Array3<f64>> {
    let path_ref = path.as_ref();
    let contents = fs::read_to_string(path_ref)
        .with_context(|| format!("reading datacube {}", path_ref.display()))?;
    let nested: Vec<Vec<Vec<f64>>> = serde_json::from_str(&contents)
        .with_context(|| format!("parsing datacube {}", path_ref.display()))?;
    datacube_from_nested(nested)
}

pub fn datacube_from_nested(nested: Vec<Vec<Vec<f64>>>) -> anyhow::Result<Array3<f64>> {
    let timesteps = nested.len();
    let x_bins = nested.first().map_or(0, Vec::len);
    let y_bins = nested
        .first()
        .and_then(|frame| frame.first())
        .map_or(0, Vec::len);

    let mut flat = Vec::with_capacity(timesteps * x_bins * y_bins);
    for (t, frame) in nested.into_iter().enumerate() {
        if frame.len() != x_bins {
            bail!("frame {} has {} rows, expected {}", t, frame.len(), x_bins);
        }
        for (x, row) in frame.into_iter().enumerate() {
            if row.len() != y_bins {
                bail!("frame {} row {} has {} values, expected {}", t, x, row.len(), y_bins);
            }
            flat.extend(row);
        }
    }

    Array3::from_shape_vec((timesteps, x_bins, y_bins), flat).context("reshaping datacube")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn nested_arrays_become_cube() {
        let cube = datacube_from_nested(vec![
            vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]],
            vec![vec![7.0, 8.0], vec![9.0, 10.0], vec![11.0, 12.0]],
        ])
        .unwrap();
        assert_eq!(cube.dim(), (2, 3, 2));
        assert_eq!(cube[[1, 2, 0]], 11.0);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = datacube_from_nested(vec![vec![vec![1.0, 2.0], vec![3.0]]]).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn load_reads_json_file() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"[[[0, 255]], [[128, 64]]]").unwrap();
        let path = temp.into_temp_path();
        let cube = load_datacube(&path).unwrap();
        assert_eq!(cube.dim(), (2, 1, 2));
    }
}
