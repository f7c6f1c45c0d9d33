use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::Settings;
use crate::core::load_models;
use crate::engine::ParallelExecutor;
use crate::utils::{Console, Launcher, SystemLauncher};

use super::commands::Args;

/// The main application struct
pub struct App {
    settings: Settings,
    console: Arc<Console>,
    launcher: Arc<dyn Launcher>,
}

impl App {
    /// Application writing to stdout/stderr and launching real processes
    pub fn new(settings: Settings) -> Self {
        Self::with_parts(settings, Arc::new(Console::stdio()), Arc::new(SystemLauncher))
    }

    pub fn with_parts(settings: Settings, console: Arc<Console>, launcher: Arc<dyn Launcher>) -> Self {
        Self {
            settings,
            console,
            launcher,
        }
    }

    /// Run every model and return the process exit code.
    ///
    /// Model failures only change the exit code under `--strict`; errors
    /// returned from here (bad wrapper path, unreadable models file) abort
    /// the run before anything is launched.
    pub async fn run(&self, args: &Args) -> Result<i32> {
        info!("Starting vega-parallel v{}", env!("CARGO_PKG_VERSION"));

        let workers = args.workers.unwrap_or_else(|| self.settings.default_workers());
        let request = Arc::new(args.to_request(&self.settings));
        debug!(?request, workers, "Execution request");

        if self.settings.validate_wrapper {
            request.validate_wrapper()?;
        }
        if self.settings.create_output_dir {
            request.ensure_output_dir()?;
        }

        let models = load_models(&args.model)
            .with_context(|| format!("Failed to load models from {}", args.model))?;
        self.console.println(&format!("Loaded {} models.", models.len()));

        let executor = ParallelExecutor::new(workers, Arc::clone(&self.launcher), Arc::clone(&self.console))?;
        let summary = executor.execute(request, models).await;
        self.console.println("All models processed.");

        info!(
            total = summary.total(),
            succeeded = summary.succeeded(),
            failed = summary.total() - summary.succeeded(),
            "Run finished in {}",
            summary.duration_display()
        );

        if args.strict && summary.has_failures() {
            return Ok(1);
        }
        Ok(0)
    }
}
