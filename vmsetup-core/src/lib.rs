pub mod command_stream;
pub mod error;
pub mod file_system;
pub mod output_macros;
pub mod step;
pub mod user;

pub use command_stream::{DryRunExecutor, Executor, Outcome, SystemExecutor};
#[cfg(any(test, feature = "test-helpers"))]
pub use command_stream::RecordingExecutor;
pub use step::{Action, Step};
