// Standard library
use std::ffi::OsStr;

// External crates
use crate::error::{Result, VmSetupError};
use crate::file_system;
use crate::step::{Action, Step};
use crate::vm_println;
use duct::cmd;
use tracing::debug;
use which::which;

/// How a step finished when it did not raise an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The child process exited unsuccessfully. `code` is `None` when it was
    /// killed by a signal.
    Failed { code: Option<i32> },
}

/// Carries out provisioning steps.
///
/// Errors are reserved for steps that could not be attempted at all (a
/// program that cannot be spawned, a file operation that failed). A child
/// process that runs and exits non-zero is reported through [`Outcome`] so
/// the caller decides whether that is fatal.
pub trait Executor {
    fn execute(&mut self, step: &Step) -> Result<Outcome>;
}

impl<E: Executor + ?Sized> Executor for &mut E {
    fn execute(&mut self, step: &Step) -> Result<Outcome> {
        (**self).execute(step)
    }
}

/// Runs steps against the real system.
///
/// Child processes inherit stdin/stdout/stderr so the invoked tools talk
/// directly to the terminal.
#[derive(Debug, Default)]
pub struct SystemExecutor;

impl SystemExecutor {
    pub fn new() -> Self {
        Self
    }

    fn run_process<A: AsRef<OsStr>>(
        &self,
        program: &str,
        args: &[A],
        cwd: Option<&std::path::Path>,
        rendered: &str,
    ) -> Result<Outcome> {
        let mut expression = cmd(program, args).unchecked();
        if let Some(dir) = cwd {
            expression = expression.dir(dir);
        }

        let output = expression
            .run()
            .map_err(|e| VmSetupError::Command(format!("'{}': {}", rendered, e)))?;

        if output.status.success() {
            Ok(Outcome::Success)
        } else {
            Ok(Outcome::Failed {
                code: output.status.code(),
            })
        }
    }
}

impl Executor for SystemExecutor {
    fn execute(&mut self, step: &Step) -> Result<Outcome> {
        let rendered = step.action.to_string();
        debug!(action = %rendered, "executing step");

        match &step.action {
            Action::Run { program, args, cwd } => {
                self.run_process(program, args.as_slice(), cwd.as_deref(), &rendered)
            }
            Action::Move { from, to } => {
                let moved_to = file_system::move_file(from, to)?;
                debug!(destination = %moved_to.display(), "moved file");
                Ok(Outcome::Success)
            }
            Action::RemoveDir { path } => {
                file_system::remove_dir(path)?;
                Ok(Outcome::Success)
            }
            Action::RemoveFile { path } => {
                file_system::remove_file(path)?;
                Ok(Outcome::Success)
            }
        }
    }
}

/// Prints what would happen and does nothing else.
#[derive(Debug, Default)]
pub struct DryRunExecutor {
    count: usize,
}

impl DryRunExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of steps that were announced.
    pub fn count(&self) -> usize {
        self.count
    }
}

impl Executor for DryRunExecutor {
    fn execute(&mut self, step: &Step) -> Result<Outcome> {
        self.count += 1;
        vm_println!("would run: {}", step.action);
        vm_println!();
        Ok(Outcome::Success)
    }
}

/// Records every step without running it. Steps whose rendered action
/// contains one of the configured needles report a failed exit status.
#[cfg(any(test, feature = "test-helpers"))]
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    pub steps: Vec<Step>,
    failing: Vec<String>,
}

#[cfg(any(test, feature = "test-helpers"))]
impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make any `Run` step whose display string contains `needle` exit with status 1.
    pub fn fail_when(mut self, needle: impl Into<String>) -> Self {
        self.failing.push(needle.into());
        self
    }

    /// The recorded actions, in execution order.
    pub fn actions(&self) -> Vec<&Action> {
        self.steps.iter().map(|s| &s.action).collect()
    }

    /// Rendered command lines for every `Run` step, in order.
    pub fn command_lines(&self) -> Vec<String> {
        self.steps
            .iter()
            .filter_map(|s| s.action.argv().map(|argv| argv.join(" ")))
            .collect()
    }

    /// Banners of every recorded step, in order.
    pub fn banners(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.banner.as_str()).collect()
    }
}

#[cfg(any(test, feature = "test-helpers"))]
impl Executor for RecordingExecutor {
    fn execute(&mut self, step: &Step) -> Result<Outcome> {
        self.steps.push(step.clone());
        let rendered = step.action.to_string();
        let is_run = matches!(step.action, Action::Run { .. });
        if is_run && self.failing.iter().any(|needle| rendered.contains(needle)) {
            return Ok(Outcome::Failed { code: Some(1) });
        }
        Ok(Outcome::Success)
    }
}

/// Checks if a command-line tool is available in the system's PATH.
pub fn is_tool_installed(tool_name: &str) -> bool {
    which(tool_name).is_ok()
}
