mod schema;

use std::path::{Path, PathBuf};
use config::{Config as ConfigLoader, FileFormat};
use tracing::{debug, info, warn};

pub use schema::{LauncherConfig, Settings};

use crate::error::{VegaParallelError, VegaResult};

const DEFAULT_CONFIG: &str = include_str!("../../config/default.toml");

impl Settings {
    /// Load settings: built-in defaults, then a user file, then `VEGA_PARALLEL_*` env vars
    pub fn load(config_path: Option<&Path>) -> VegaResult<Self> {
        debug!("Loading configuration");

        let mut config_builder = ConfigLoader::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        match config_path {
            Some(path) if path.exists() => {
                info!("Loading user configuration from: {}", path.display());
                config_builder = config_builder.add_source(config::File::from(path));
            }
            Some(path) => {
                warn!("Specified configuration file not found: {}", path.display());
            }
            None => {
                let default_path = Self::default_config_path();
                if default_path.exists() {
                    info!("Loading default configuration from: {}", default_path.display());
                    config_builder =
                        config_builder.add_source(config::File::from(default_path.as_path()));
                }
            }
        }

        config_builder = config_builder.add_source(
            config::Environment::with_prefix("VEGA_PARALLEL")
                .prefix_separator("_")
                .separator("__"),
        );

        let settings: Settings = config_builder
            .build()
            .map_err(|e| VegaParallelError::Config(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| VegaParallelError::Config(format!("Failed to parse configuration: {}", e)))?;

        if settings.launcher.program.trim().is_empty() {
            return Err(VegaParallelError::Config(
                "launcher.program must not be empty".to_string(),
            ));
        }

        Ok(settings)
    }

    /// Get the default configuration path
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".vega-parallel/config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use parking_lot::Mutex;

    // Environment variables are process-wide; config tests take turns
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Removes the variables it set when dropped
    struct EnvVars(Vec<&'static str>);

    impl EnvVars {
        fn set(vars: &[(&'static str, &str)]) -> Self {
            for (key, value) in vars {
                std::env::set_var(key, value);
            }
            Self(vars.iter().map(|(key, _)| *key).collect())
        }
    }

    impl Drop for EnvVars {
        fn drop(&mut self) {
            for key in &self.0 {
                std::env::remove_var(key);
            }
        }
    }

    fn user_file(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file
    }

    #[test]
    fn test_builtin_defaults() {
        let _lock = ENV_LOCK.lock();
        let missing = Path::new("/definitely/not/here/vega-parallel.toml");
        let settings = Settings::load(Some(missing)).unwrap();

        assert_eq!(settings.launcher.program, "java");
        assert_eq!(settings.launcher.args, vec!["-jar".to_string()]);
        assert_eq!(settings.launcher.subcommand, "vega");
        assert!(settings.validate_wrapper);
        assert!(settings.create_output_dir);
        assert!(settings.workers.is_none());
    }

    #[test]
    fn test_user_file_overrides_defaults() {
        let _lock = ENV_LOCK.lock();
        let file = user_file(&[
            "workers = 3",
            "validate_wrapper = false",
            "[launcher]",
            "program = \"/usr/bin/env\"",
            "args = [\"java\", \"-jar\"]",
            "subcommand = \"custom-command\"",
        ]);

        let settings = Settings::load(Some(file.path())).unwrap();

        assert_eq!(settings.workers, Some(3));
        assert_eq!(settings.default_workers(), 3);
        assert!(!settings.validate_wrapper);
        assert!(settings.create_output_dir);
        assert_eq!(settings.launcher.program, "/usr/bin/env");
        assert_eq!(settings.launcher.args.len(), 2);
        assert_eq!(settings.launcher.subcommand, "custom-command");
    }

    #[test]
    fn test_env_overrides_user_file() {
        let _lock = ENV_LOCK.lock();
        let file = user_file(&[
            "workers = 3",
            "validate_wrapper = false",
            "[launcher]",
            "program = \"/usr/bin/env\"",
            "subcommand = \"vega\"",
        ]);
        let _env = EnvVars::set(&[
            ("VEGA_PARALLEL_LAUNCHER__PROGRAM", "python3"),
            ("VEGA_PARALLEL_WORKERS", "5"),
        ]);

        let settings = Settings::load(Some(file.path())).unwrap();

        assert_eq!(settings.launcher.program, "python3");
        assert_eq!(settings.workers, Some(5));
        assert_eq!(settings.default_workers(), 5);
        assert!(!settings.validate_wrapper);
        assert_eq!(settings.launcher.subcommand, "vega");
    }

    #[test]
    fn test_default_workers_falls_back_to_cpus() {
        let settings = Settings {
            workers: Some(0),
            ..Settings::default()
        };
        assert_eq!(settings.default_workers(), num_cpus::get());
    }
}
