use crate::codec::{self, Frame};
use crate::color::ColorScheme;
use crate::document::options::FigureOptions;
use crate::math::stats::{Sample, StatsHelper};
use crate::prelude::{DataAxis, GraphType, PlotError, PlotResult};
use crate::telemetry::log::LogManager;
use ndarray::{ArrayBase, Axis, Data, Ix3};
use serde::{Deserialize, Serialize};

/// Figure document: the packed intensity cube plus everything the viewer
/// needs to draw it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Axes {
    #[serde(default)]
    color_scheme: ColorScheme,
    #[serde(rename = "type", default)]
    graph_type: Option<GraphType>,
    #[serde(with = "crate::codec::encoded_bytes", default)]
    data: Option<Vec<u8>>,
    #[serde(default)]
    options: FigureOptions,
    #[serde(skip, default = "axes_logger")]
    logger: LogManager,
}

fn axes_logger() -> LogManager {
    LogManager::new("axes")
}

impl Default for Axes {
    fn default() -> Self {
        Self::new()
    }
}

impl Axes {
    pub fn new() -> Self {
        Self {
            color_scheme: ColorScheme::default(),
            graph_type: None,
            data: None,
            options: FigureOptions::default(),
            logger: axes_logger(),
        }
    }

    pub fn color_scheme(&self) -> &ColorScheme {
        &self.color_scheme
    }

    pub fn graph_type(&self) -> Option<GraphType> {
        self.graph_type
    }

    /// Packed TIFF bytes, once a cube has been loaded.
    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    pub fn options(&self) -> &FigureOptions {
        &self.options
    }

    /// Unpacks the stored cube into its frames.
    pub fn frames(&self) -> PlotResult<Vec<Frame>> {
        let data = self.data.as_deref().ok_or(PlotError::DataNotLoaded)?;
        codec::decode_frames(data)
    }

    /// Checks that the stored pages agree with the recorded shape options.
    pub(crate) fn verify_frames(&self) -> PlotResult<()> {
        if self.data.is_none() {
            return Ok(());
        }
        let frames = self.frames()?;
        let options = &self.options;
        if frames.len() != options.timesteps {
            return Err(PlotError::InvalidData(format!(
                "document holds {} frames but timesteps is {}",
                frames.len(),
                options.timesteps
            )));
        }
        let expected = (options.y_bins, options.x_bins);
        if let Some(frame) = frames
            .iter()
            .find(|frame| (Some(frame.width as usize), Some(frame.height as usize)) != expected)
        {
            return Err(PlotError::InvalidData(format!(
                "frame of {}x{} does not match x_bins {:?} and y_bins {:?}",
                frame.height, frame.width, options.x_bins, options.y_bins
            )));
        }
        Ok(())
    }

    /// Number of ticks the axis needs, or `None` before data is loaded.
    pub fn bin_count(&self, axis: DataAxis) -> Option<usize> {
        self.data.as_ref()?;
        match axis {
            DataAxis::T => Some(self.options.timesteps),
            DataAxis::X => self.options.x_bins,
            DataAxis::Y => self.options.y_bins,
        }
    }

    /// Loads a `(t, x, y)` intensity cube as a histogram. Samples are
    /// truncated into `0..=255`; each time slice becomes one page whose rows
    /// run along x.
    pub fn hist<S, T>(&mut self, datacube: &ArrayBase<S, Ix3>) -> PlotResult<&mut Self>
    where
        S: Data<Elem = T>,
        T: Sample,
    {
        let (timesteps, x_bins, y_bins) = datacube.dim();
        if timesteps == 0 || x_bins == 0 || y_bins == 0 {
            return Err(PlotError::InvalidData(format!(
                "datacube shape ({}, {}, {}) has an empty dimension",
                timesteps, x_bins, y_bins
            )));
        }
        let width = frame_extent(y_bins)?;
        let height = frame_extent(x_bins)?;

        let frames = datacube
            .axis_iter(Axis(0))
            .map(|slice| {
                let pixels = slice
                    .iter()
                    .map(|&sample| StatsHelper::to_intensity(sample.to_f64()))
                    .collect();
                Frame::new(width, height, pixels)
            })
            .collect::<PlotResult<Vec<_>>>()?;

        let (min, max) = frames
            .iter()
            .filter_map(Frame::extrema)
            .fold((u8::MAX, u8::MIN), |(lo, hi), (a, b)| (lo.min(a), hi.max(b)));
        let data = codec::encode_frames(&frames)?;

        self.logger.record(&format!(
            "histogram loaded: {} frames of {}x{}, intensity {}..={}, {} bytes",
            timesteps,
            x_bins,
            y_bins,
            min,
            max,
            data.len()
        ));

        self.data = Some(data);
        self.graph_type = Some(GraphType::Histogram);
        self.options.max_intensity = Some(f64::from(max));
        self.options.min_intensity = Some(f64::from(min));
        self.options.compact = true;
        self.options.timesteps = timesteps;
        self.options.x_bins = Some(x_bins);
        self.options.y_bins = Some(y_bins);

        self.default_ticks(DataAxis::T, 0.0, (timesteps - 1) as f64, timesteps);
        self.default_ticks(DataAxis::X, 0.0, x_bins as f64, x_bins);
        self.default_ticks(DataAxis::Y, 0.0, y_bins as f64, y_bins);

        Ok(self)
    }

    fn default_ticks(&mut self, axis: DataAxis, start: f64, end: f64, count: usize) {
        let existing = self.options.ticks(axis).map(<[f64]>::len);
        if existing == Some(count) {
            return;
        }
        if let Some(stale) = existing {
            self.logger.caution(&format!(
                "axis {} had {} ticks but now has {} bins; reset to defaults",
                axis, stale, count
            ));
        }
        *self.options.ticks_mut(axis) = Some(StatsHelper::linspace(start, end, count));
    }

    pub fn set_unit(&mut self, unit: impl Into<String>, axis: DataAxis) -> &mut Self {
        *self.options.unit_mut(axis) = unit.into();
        self
    }

    pub fn t_unit(&mut self, unit: impl Into<String>) -> &mut Self {
        self.set_unit(unit, DataAxis::T)
    }

    pub fn x_unit(&mut self, unit: impl Into<String>) -> &mut Self {
        self.set_unit(unit, DataAxis::X)
    }

    pub fn y_unit(&mut self, unit: impl Into<String>) -> &mut Self {
        self.set_unit(unit, DataAxis::Y)
    }

    pub fn set_label(&mut self, label: impl Into<String>, axis: DataAxis) -> &mut Self {
        *self.options.label_mut(axis) = label.into();
        self
    }

    pub fn set_tlabel(&mut self, label: impl Into<String>) -> &mut Self {
        self.set_label(label, DataAxis::T)
    }

    pub fn set_xlabel(&mut self, label: impl Into<String>) -> &mut Self {
        self.set_label(label, DataAxis::X)
    }

    pub fn set_ylabel(&mut self, label: impl Into<String>) -> &mut Self {
        self.set_label(label, DataAxis::Y)
    }

    /// Evenly spaced ticks from `start` to `end`, one per bin of `axis`.
    pub fn uniform_ticks(&mut self, start: f64, end: f64, axis: DataAxis) -> PlotResult<&mut Self> {
        let count = self.bin_count(axis).ok_or(PlotError::DataNotLoaded)?;
        if !start.is_finite() || !end.is_finite() {
            return Err(PlotError::InvalidData(format!(
                "axis {} range {}..{} is not finite",
                axis, start, end
            )));
        }
        *self.options.ticks_mut(axis) = Some(StatsHelper::linspace(start, end, count));
        Ok(self)
    }

    pub fn uniform_axis(&mut self, start: f64, end: f64, axis: DataAxis) -> PlotResult<&mut Self> {
        self.uniform_ticks(start, end, axis)
    }

    pub fn t_axis(&mut self, start: f64, end: f64) -> PlotResult<&mut Self> {
        self.uniform_ticks(start, end, DataAxis::T)
    }

    pub fn x_axis(&mut self, start: f64, end: f64) -> PlotResult<&mut Self> {
        self.uniform_ticks(start, end, DataAxis::X)
    }

    pub fn y_axis(&mut self, start: f64, end: f64) -> PlotResult<&mut Self> {
        self.uniform_ticks(start, end, DataAxis::Y)
    }

    /// Explicit tick values; exactly one per bin of `axis`.
    pub fn custom_ticks(&mut self, ticks: Vec<f64>, axis: DataAxis) -> PlotResult<&mut Self> {
        let expected = self.bin_count(axis).ok_or(PlotError::DataNotLoaded)?;
        if ticks.len() != expected {
            return Err(PlotError::TickCountMismatch {
                axis,
                expected,
                actual: ticks.len(),
            });
        }
        if ticks.iter().any(|tick| !tick.is_finite()) {
            return Err(PlotError::InvalidData(format!(
                "axis {} ticks contain a non-finite value",
                axis
            )));
        }
        *self.options.ticks_mut(axis) = Some(ticks);
        Ok(self)
    }

    pub fn set_loop(&mut self, looped: bool) -> &mut Self {
        self.options.looped = looped;
        self
    }

    pub fn cmap<S: AsRef<str>>(&mut self, colors: Vec<S>, positions: Vec<f64>) -> PlotResult<&mut Self> {
        self.color_scheme = ColorScheme::new(colors, positions)?;
        Ok(self)
    }

    pub fn set_size(&mut self, width: u32, height: u32) -> PlotResult<&mut Self> {
        if width == 0 || height == 0 {
            return Err(PlotError::InvalidData(format!(
                "figure size {}x{} must be positive",
                width, height
            )));
        }
        self.options.width = width;
        self.options.height = height;
        Ok(self)
    }

    pub fn set_margin(&mut self, margin: u32) -> &mut Self {
        self.options.margin = margin;
        self
    }
}

fn frame_extent(bins: usize) -> PlotResult<u32> {
    u32::try_from(bins)
        .map_err(|_| PlotError::InvalidData(format!("{} bins do not fit a frame", bins)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array3, ShapeBuilder};

    fn cube(t: usize, x: usize, y: usize) -> Array3<f64> {
        Array3::from_shape_fn((t, x, y).f(), |(ti, xi, yi)| (ti * 100 + xi * 10 + yi) as f64)
    }

    #[test]
    fn new_axes_are_empty() {
        let axes = Axes::new();
        assert!(axes.data().is_none());
        assert!(axes.graph_type().is_none());
        assert_eq!(axes.bin_count(DataAxis::X), None);
    }

    #[test]
    fn hist_fills_shape_and_intensity_options() {
        let mut axes = Axes::new();
        axes.hist(&cube(3, 4, 5)).unwrap();

        let options = axes.options();
        assert_eq!(axes.graph_type(), Some(GraphType::Histogram));
        assert!(options.compact);
        assert_eq!(options.timesteps, 3);
        assert_eq!(options.x_bins, Some(4));
        assert_eq!(options.y_bins, Some(5));
        assert_eq!(options.min_intensity, Some(0.0));
        assert_eq!(options.max_intensity, Some(234.0));
        assert_eq!(options.t_axis.as_deref(), Some(&[0.0, 1.0, 2.0][..]));
        assert_eq!(options.x_axis.as_ref().map(Vec::len), Some(4));
        assert_eq!(options.y_axis.as_ref().and_then(|t| t.last().copied()), Some(5.0));
    }

    #[test]
    fn hist_pages_follow_time_with_rows_along_x() {
        let mut axes = Axes::new();
        axes.hist(&cube(2, 2, 3)).unwrap();
        let frames = axes.frames().unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].width, 3);
        assert_eq!(frames[1].height, 2);
        assert_eq!(frames[1].pixels, vec![100, 101, 102, 110, 111, 112]);
    }

    #[test]
    fn hist_saturates_out_of_range_samples() {
        let data = Array3::from_shape_vec((1, 1, 3), vec![-5i32, 128, 1000]).unwrap();
        let mut axes = Axes::new();
        axes.hist(&data.view()).unwrap();
        assert_eq!(axes.frames().unwrap()[0].pixels, vec![0, 128, 255]);
        assert_eq!(axes.options().max_intensity, Some(255.0));
    }

    #[test]
    fn hist_accepts_wide_integer_cubes() {
        let data = Array3::from_shape_fn((2, 2, 2), |(t, x, y)| (t * 4 + x * 2 + y) as i64 * 40);
        let mut axes = Axes::new();
        axes.hist(&data).unwrap();
        assert_eq!(axes.frames().unwrap()[1].pixels, vec![160, 200, 240, 255]);

        let indices = Array3::<usize>::zeros((1, 2, 2));
        axes.hist(&indices).unwrap();
        assert_eq!(axes.options().max_intensity, Some(0.0));
    }

    #[test]
    fn hist_rejects_empty_dimension() {
        let mut axes = Axes::new();
        let err = axes.hist(&Array3::<f64>::zeros((0, 2, 2))).unwrap_err();
        assert!(matches!(err, PlotError::InvalidData(_)));
    }

    #[test]
    fn hist_keeps_matching_ticks_and_resets_stale_ones() {
        let mut axes = Axes::new();
        axes.hist(&cube(2, 3, 3)).unwrap();
        axes.x_axis(-1.0, 1.0).unwrap();
        axes.y_axis(5.0, 7.0).unwrap();

        axes.hist(&cube(2, 3, 4)).unwrap();
        assert_eq!(axes.options().x_axis.as_deref(), Some(&[-1.0, 0.0, 1.0][..]));
        assert_eq!(axes.options().y_axis.as_ref().map(Vec::len), Some(4));
        assert_eq!(axes.options().y_axis.as_ref().map(|t| t[0]), Some(0.0));
    }

    #[test]
    fn ticks_before_data_are_rejected() {
        let mut axes = Axes::new();
        assert!(matches!(
            axes.x_axis(0.0, 1.0),
            Err(PlotError::DataNotLoaded)
        ));
        assert!(matches!(
            axes.custom_ticks(vec![0.0], DataAxis::T),
            Err(PlotError::DataNotLoaded)
        ));
    }

    #[test]
    fn uniform_ticks_use_axis_bin_count() {
        let mut axes = Axes::new();
        axes.hist(&cube(5, 3, 2)).unwrap();
        axes.uniform_axis(0.0, 10.0, DataAxis::T).unwrap();
        axes.uniform_ticks(-1.0, 1.0, DataAxis::X).unwrap();
        axes.y_axis(0.0, 4.0).unwrap();

        let options = axes.options();
        assert_eq!(options.ticks(DataAxis::T), Some(&[0.0, 2.5, 5.0, 7.5, 10.0][..]));
        assert_eq!(options.ticks(DataAxis::X), Some(&[-1.0, 0.0, 1.0][..]));
        assert_eq!(options.ticks(DataAxis::Y), Some(&[0.0, 4.0][..]));
        assert!(axes.uniform_ticks(f64::NAN, 1.0, DataAxis::X).is_err());
    }

    #[test]
    fn custom_ticks_must_match_bins() {
        let mut axes = Axes::new();
        axes.hist(&cube(2, 3, 2)).unwrap();
        let err = axes.custom_ticks(vec![1.0, 2.0], DataAxis::X).unwrap_err();
        assert!(matches!(
            err,
            PlotError::TickCountMismatch {
                axis: DataAxis::X,
                expected: 3,
                actual: 2
            }
        ));
        axes.custom_ticks(vec![1.0, 4.0, 9.0], DataAxis::X).unwrap();
        assert_eq!(axes.options().ticks(DataAxis::X), Some(&[1.0, 4.0, 9.0][..]));
    }

    #[test]
    fn custom_ticks_must_be_finite() {
        let mut axes = Axes::new();
        axes.hist(&cube(2, 3, 2)).unwrap();
        axes.custom_ticks(vec![1.0, 4.0, 9.0], DataAxis::X).unwrap();

        let err = axes
            .custom_ticks(vec![0.0, f64::NAN, 1.0], DataAxis::X)
            .unwrap_err();
        assert!(matches!(err, PlotError::InvalidData(_)));
        assert!(axes
            .custom_ticks(vec![0.0, f64::INFINITY, 1.0], DataAxis::X)
            .is_err());
        assert_eq!(axes.options().ticks(DataAxis::X), Some(&[1.0, 4.0, 9.0][..]));
    }

    #[test]
    fn labels_units_and_loop_are_recorded() {
        let mut axes = Axes::new();
        axes.set_label("time", DataAxis::T)
            .set_xlabel("x")
            .set_ylabel("y")
            .set_unit("Myr", DataAxis::T)
            .x_unit("pc")
            .y_unit("pc")
            .set_loop(true)
            .set_margin(12);

        let options = axes.options();
        assert_eq!(options.label(DataAxis::T), "time");
        assert_eq!(options.label(DataAxis::Y), "y");
        assert_eq!(options.unit(DataAxis::T), "Myr");
        assert_eq!(options.x_unit, "pc");
        assert!(options.looped);
        assert_eq!(options.margin, 12);
    }

    #[test]
    fn cmap_replaces_scheme_only_when_valid() {
        let mut axes = Axes::new();
        axes.cmap(vec!["navy", "r", "white"], vec![0.0, 0.4, 1.0]).unwrap();
        assert_eq!(axes.color_scheme().colors(), ["navy", "#ff0000", "white"]);

        assert!(axes.cmap(vec!["navy"], vec![0.0]).is_err());
        assert_eq!(axes.color_scheme().colors().len(), 3);
    }

    #[test]
    fn set_size_rejects_zero() {
        let mut axes = Axes::new();
        assert!(axes.set_size(0, 100).is_err());
        axes.set_size(800, 400).unwrap();
        assert_eq!((axes.options().width, axes.options().height), (800, 400));
    }
}
