// src/core/request.rs
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::LauncherConfig;
use crate::error::{VegaParallelError, VegaResult};
use super::models::WorkItem;

/// Flags forwarded verbatim to every wrapper invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrapperOptions {
    pub fast: bool,
    pub jsonl: bool,
    pub list_models: bool,
    pub id_field: Option<String>,
    pub smiles_field: Option<String>,
    pub max_rows: Option<i64>,
    pub reinit: Option<i64>,
    pub smiles: Option<String>,
}

/// Everything needed to build the invocation for any model of this run.
/// Built once after argument parsing and shared read-only by all tasks.
#[derive(Debug, Clone)]
pub struct ExecutionRequest {
    pub launcher: LauncherConfig,
    pub wrapper: PathBuf,
    pub input: PathBuf,
    pub output: PathBuf,
    pub options: WrapperOptions,
}

/// A fully assembled process invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

impl ExecutionRequest {
    /// Build the wrapper invocation for one model:
    /// `<program> <launcher args> <wrapper> <subcommand> -i <input> -o <output> -m <model> [flags]`
    pub fn command_for(&self, model: &WorkItem) -> CommandLine {
        let mut args = self.launcher.args.clone();
        args.push(self.wrapper.display().to_string());
        args.push(self.launcher.subcommand.clone());
        args.extend([
            "-i".to_string(),
            self.input.display().to_string(),
            "-o".to_string(),
            self.output.display().to_string(),
            "-m".to_string(),
            model.id().to_string(),
        ]);

        let opts = &self.options;
        if opts.fast {
            args.push("-f".to_string());
        }
        if opts.jsonl {
            args.push("-j".to_string());
        }
        if opts.list_models {
            args.push("-l".to_string());
        }
        if let Some(field) = non_empty(&opts.id_field) {
            args.push(format!("--idfield={}", field));
        }
        if let Some(field) = non_empty(&opts.smiles_field) {
            args.push(format!("--smilesfield={}", field));
        }
        if let Some(rows) = opts.max_rows {
            args.extend(["-x".to_string(), rows.to_string()]);
        }
        if let Some(reinit) = opts.reinit {
            args.extend(["-z".to_string(), reinit.to_string()]);
        }
        if let Some(smiles) = non_empty(&opts.smiles) {
            args.extend(["-s".to_string(), smiles.to_string()]);
        }

        CommandLine {
            program: self.launcher.program.clone(),
            args,
        }
    }

    /// Check the wrapper exists as a regular file
    pub fn validate_wrapper(&self) -> VegaResult<()> {
        validate_wrapper(&self.wrapper)
    }

    /// Create the shared output directory if it is missing
    pub fn ensure_output_dir(&self) -> VegaResult<()> {
        if !self.output.is_dir() {
            info!("Creating output directory {}", self.output.display());
            std::fs::create_dir_all(&self.output).map_err(|e| {
                VegaParallelError::Config(format!(
                    "Failed to create output directory {}: {}",
                    self.output.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }
}

fn validate_wrapper(path: &Path) -> VegaResult<()> {
    debug!("Validating wrapper {}", path.display());
    if !path.exists() {
        return Err(VegaParallelError::Config(format!(
            "Wrapper not found: {}",
            path.display()
        )));
    }
    if !path.is_file() {
        return Err(VegaParallelError::Config(format!(
            "Wrapper path is not a file: {}",
            path.display()
        )));
    }
    Ok(())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
