// Adapters layer: concrete implementations of the domain ports.

pub mod navigator;
pub mod sink;

pub use navigator::{LoggingNavigator, RecordingNavigator};
pub use sink::{JsonFileSink, LoggingSink};
