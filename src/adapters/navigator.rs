use crate::domain::ports::Navigator;

/// Logs each destination. Used by the CLI, which has no pages to show.
#[derive(Debug, Default)]
pub struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn navigate(&mut self, destination: &str) {
        tracing::info!("➡️ Navigate to {}", destination);
    }
}

/// Keeps every destination in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingNavigator {
    visited: Vec<String>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> &[String] {
        &self.visited
    }

    pub fn last(&self) -> Option<&str> {
        self.visited.last().map(String::as_str)
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, destination: &str) {
        self.visited.push(destination.to_string());
    }
}
