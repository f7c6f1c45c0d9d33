use clap::Parser;
use std::path::PathBuf;

use crate::config::Settings;
use crate::core::{ExecutionRequest, WrapperOptions};

#[derive(Parser, Debug)]
#[command(name = "vega-parallel", version)]
#[command(about = "Run VEGA models in parallel through the wrapper CLI")]
pub struct Args {
    #[arg(short, long, value_parser = parse_workers, help = "Parallel workers (default: config, else CPU count)")]
    pub workers: Option<usize>,

    #[arg(long = "wrapper-jar", value_name = "PATH", help = "vega-wrapper-app jar")]
    pub wrapper_jar: PathBuf,

    #[arg(short, long, help = "Input file")]
    pub input: PathBuf,

    #[arg(short, long, help = "Output directory")]
    pub output: PathBuf,

    #[arg(short, long, help = "Model key or file of model keys (tab-delimited, first column)")]
    pub model: String,

    #[arg(long, help = "Name of the column with molecule ID")]
    pub idfield: Option<String>,

    #[arg(long, help = "Name of the column with SMILES")]
    pub smilesfield: Option<String>,

    #[arg(short, long, help = "Enable fast mode")]
    pub fast: bool,

    #[arg(short, long, help = "Write JSON lines results")]
    pub jsonl: bool,

    #[arg(short, long, help = "List models")]
    pub listmodels: bool,

    #[arg(short = 'x', long, allow_negative_numbers = true, help = "Max rows to process from file")]
    pub maxrows: Option<i64>,

    #[arg(short = 'z', long, allow_negative_numbers = true, help = "Reinitialize model every N rows")]
    pub reinit: Option<i64>,

    #[arg(short, long, help = "Input SMILES")]
    pub smiles: Option<String>,

    #[arg(long, value_name = "TOKEN", help = "Wrapper subcommand (default: config, else vega)")]
    pub subcommand: Option<String>,

    #[arg(long, help = "Exit with status 1 when any model fails")]
    pub strict: bool,

    #[arg(short, long, help = "Configuration file")]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Verbose logging")]
    pub verbose: bool,
}

impl Args {
    /// Freeze arguments and settings into the request shared by every task
    pub fn to_request(&self, settings: &Settings) -> ExecutionRequest {
        let mut launcher = settings.launcher.clone();
        if let Some(subcommand) = &self.subcommand {
            launcher.subcommand = subcommand.clone();
        }

        ExecutionRequest {
            launcher,
            wrapper: self.wrapper_jar.clone(),
            input: self.input.clone(),
            output: self.output.clone(),
            options: WrapperOptions {
                fast: self.fast,
                jsonl: self.jsonl,
                list_models: self.listmodels,
                id_field: self.idfield.clone(),
                smiles_field: self.smilesfield.clone(),
                max_rows: self.maxrows,
                reinit: self.reinit,
                smiles: self.smiles.clone(),
            },
        }
    }
}

fn parse_workers(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("worker count must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}
