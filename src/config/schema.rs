use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub launcher: LauncherConfig,

    /// Default worker count; the number of logical CPUs when unset.
    #[serde(default)]
    pub workers: Option<usize>,

    #[serde(default = "default_true")]
    pub validate_wrapper: bool,

    #[serde(default = "default_true")]
    pub create_output_dir: bool,
}

/// How the wrapper is invoked: `<program> <args...> <wrapper> <subcommand>`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LauncherConfig {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    pub subcommand: String,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            program: "java".to_string(),
            args: vec!["-jar".to_string()],
            subcommand: "vega".to_string(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            launcher: LauncherConfig::default(),
            workers: None,
            validate_wrapper: true,
            create_output_dir: true,
        }
    }
}

impl Settings {
    /// Worker count to use when none is given on the command line
    pub fn default_workers(&self) -> usize {
        self.workers.filter(|w| *w > 0).unwrap_or_else(num_cpus::get)
    }
}

fn default_true() -> bool {
    true
}
