// src/engine/parallel.rs
use std::sync::Arc;
use std::time::Instant;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Semaphore;
use tracing::{debug, error, info};

use crate::core::{ExecutionRequest, WorkItem};
use crate::error::{VegaParallelError, VegaResult};
use crate::utils::{Console, Launcher};
use super::summary::RunSummary;
use super::task::{run_task, TaskResult, LAUNCH_FAILURE_STATUS};

/// Runs one wrapper process per model with at most `max_concurrent_tasks`
/// of them alive at once
pub struct ParallelExecutor {
    max_concurrent_tasks: usize,
    semaphore: Arc<Semaphore>,
    launcher: Arc<dyn Launcher>,
    console: Arc<Console>,
}

impl ParallelExecutor {
    /// Create a new parallel executor
    pub fn new(
        max_concurrent_tasks: usize,
        launcher: Arc<dyn Launcher>,
        console: Arc<Console>,
    ) -> VegaResult<Self> {
        if max_concurrent_tasks == 0 {
            return Err(VegaParallelError::InvalidInput(
                "worker count must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            max_concurrent_tasks,
            semaphore: Arc::new(Semaphore::new(max_concurrent_tasks)),
            launcher,
            console,
        })
    }

    /// Run every model to completion and collect one result per model in
    /// completion order. Individual failures never stop the other models;
    /// they are reported on the error stream once all models are done.
    pub async fn execute(
        &self,
        request: Arc<ExecutionRequest>,
        models: Vec<WorkItem>,
    ) -> RunSummary {
        let started = Instant::now();
        let total = models.len();
        info!(
            "Executing {} models with max concurrency {}",
            total, self.max_concurrent_tasks
        );

        let mut pending: FuturesUnordered<_> = models
            .into_iter()
            .map(|model| {
                let id = model.id().to_string();
                let semaphore = Arc::clone(&self.semaphore);
                let request = Arc::clone(&request);
                let launcher = Arc::clone(&self.launcher);
                let console = Arc::clone(&self.console);

                let handle = tokio::spawn(async move {
                    let _permit = match semaphore.acquire_owned().await {
                        Ok(permit) => permit,
                        Err(_) => {
                            error!(model = %model, "Worker pool closed before the model could run");
                            return TaskResult::new(model.id(), LAUNCH_FAILURE_STATUS);
                        }
                    };
                    run_task(model, request, launcher, console).await
                });

                async move { (id, handle.await) }
            })
            .collect();

        let mut results = Vec::with_capacity(total);
        while let Some((model, joined)) = pending.next().await {
            let result = match joined {
                Ok(result) => result,
                Err(e) => {
                    error!(model = %model, "Task aborted: {}", e);
                    TaskResult::new(model, LAUNCH_FAILURE_STATUS)
                }
            };
            debug!(
                model = %result.model,
                status = result.status,
                "Collected result {}/{}",
                results.len() + 1,
                total
            );
            results.push(result);
        }

        let summary = RunSummary::new(results, started.elapsed());
        for failed in summary.failures() {
            self.console
                .tagged_err(&failed.model, &format!("FAILED with exit code {}", failed.status));
        }

        summary
    }
}
