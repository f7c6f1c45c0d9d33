pub mod models;
pub mod request;

pub use models::{load_models, WorkItem};
pub use request::{CommandLine, ExecutionRequest, WrapperOptions};
