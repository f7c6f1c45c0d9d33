pub mod console;
pub mod process;

pub use console::Console;
pub use process::{Launcher, RunningProcess, SystemLauncher};
