pub mod axes;
pub mod options;

pub use axes::Axes;
pub use options::FigureOptions;
