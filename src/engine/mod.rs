mod parallel;
mod summary;
mod task;

pub use parallel::ParallelExecutor;
pub use summary::{format_duration, RunSummary};
pub use task::{run_task, TaskResult, LAUNCH_FAILURE_STATUS};
