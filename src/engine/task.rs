// src/engine/task.rs
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::core::{ExecutionRequest, WorkItem};
use crate::error::VegaParallelError;
use crate::utils::{Console, Launcher};

/// Status recorded for a model whose process never ran to completion
pub const LAUNCH_FAILURE_STATUS: i32 = -1;

/// Outcome of running one model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskResult {
    pub model: String,
    pub status: i32,
}

impl TaskResult {
    pub fn new(model: impl Into<String>, status: i32) -> Self {
        Self {
            model: model.into(),
            status,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 0
    }
}

/// Run one model: launch the wrapper, stream its output with a `[<model>] `
/// prefix and report its exit status. Never fails; a process that cannot be
/// started yields [`LAUNCH_FAILURE_STATUS`].
pub async fn run_task(
    model: WorkItem,
    request: Arc<ExecutionRequest>,
    launcher: Arc<dyn Launcher>,
    console: Arc<Console>,
) -> TaskResult {
    let tag = model.id();
    let command = request.command_for(&model);
    console.tagged(tag, &format!("START: {}", command));

    let mut process = match launcher.launch(&command) {
        Ok(process) => process,
        Err(source) => {
            let err = VegaParallelError::Spawn {
                model: tag.to_string(),
                source,
            };
            error!("{}", err);
            console.tagged_err(tag, &format!("ERROR: {}", err));
            console.tagged(tag, &format!("EXIT {}", LAUNCH_FAILURE_STATUS));
            return TaskResult::new(tag, LAUNCH_FAILURE_STATUS);
        }
    };

    let mut lines = 0usize;
    loop {
        match process.next_line().await {
            Ok(Some(line)) => {
                lines += 1;
                console.tagged(tag, &line);
            }
            Ok(None) => break,
            Err(e) => {
                warn!(model = tag, "Output stream failed, waiting for exit: {}", e);
                break;
            }
        }
    }

    let status = match process.wait().await {
        Ok(status) => status,
        Err(e) => {
            error!(model = tag, "Failed to wait for process: {}", e);
            LAUNCH_FAILURE_STATUS
        }
    };

    debug!(model = tag, lines, status, "Model finished");
    console.tagged(tag, &format!("EXIT {}", status));
    TaskResult::new(tag, status)
}
