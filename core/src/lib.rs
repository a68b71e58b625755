//! Builds figure documents for animated histogram playback.
//!
//! A `(t, x, y)` intensity cube is packed into a multi-page grayscale TIFF and
//! stored, together with labels, units, tick values and a colormap, in a JSON
//! document that the web viewer replays frame by frame.

pub mod codec;
pub mod color;
pub mod document;
pub mod export;
pub mod math;
pub mod prelude;
pub mod telemetry;

pub use color::ColorScheme;
pub use document::{Axes, FigureOptions};
pub use export::{OutputFormat, OutputStyle, SaveOptions};
pub use math::Sample;
pub use prelude::{DataAxis, GraphType, PlotError, PlotResult};
