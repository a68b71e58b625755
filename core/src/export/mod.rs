pub mod save;

pub use save::{OutputFormat, OutputStyle, SaveOptions, VIEWER_URL};
