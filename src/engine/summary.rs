// src/engine/summary.rs
use std::time::Duration;

use super::task::TaskResult;

/// Aggregated outcome of a run, results in completion order
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub results: Vec<TaskResult>,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn new(results: Vec<TaskResult>, elapsed: Duration) -> Self {
        Self { results, elapsed }
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &TaskResult> {
        self.results.iter().filter(|r| !r.is_success())
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    pub fn duration_display(&self) -> String {
        format_duration(self.elapsed)
    }
}

/// `1h 2m 3s`, `4m 5s` or `6s`
pub fn format_duration(duration: Duration) -> String {
    let seconds = duration.as_secs();
    let minutes = seconds / 60;
    let hours = minutes / 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes % 60, seconds % 60)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds % 60)
    } else {
        format!("{}s", seconds)
    }
}
