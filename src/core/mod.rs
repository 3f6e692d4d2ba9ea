pub mod catalog;
pub mod envelope;
pub mod registry;
pub mod toolkit;

pub use catalog::ToolSpec;
pub use envelope::{Envelope, OperationError, OperationResult};
pub use registry::{ToolRegistry, UnknownTool};
pub use toolkit::RedditToolkit;
