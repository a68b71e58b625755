pub mod stats;

pub use stats::{Sample, StatsHelper};
