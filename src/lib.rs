pub mod cli;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod utils;

// Re-export main types for easier access
pub use cli::{App, Args};
pub use config::Settings;
pub use crate::core::{
    load_models,
    CommandLine,
    ExecutionRequest,
    WorkItem,
    WrapperOptions
};
pub use engine::{ParallelExecutor, RunSummary, TaskResult};
pub use error::{VegaParallelError, VegaResult};
pub use utils::{Console, Launcher, RunningProcess, SystemLauncher};
