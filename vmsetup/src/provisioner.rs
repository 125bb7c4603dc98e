//! Step helpers shared by every provisioning block.
//!
//! Each helper standardises the banner text and builds the matching
//! [`Action`]; the executor decides what actually happens.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use vmsetup_core::error::{Result, VmSetupError};
use vmsetup_core::output_macros::banner::print_banner;
use vmsetup_core::{Action, Executor, Outcome, Step};
use vmsetup_messages::{msg, MESSAGES};

use crate::repo::Repo;

/// What to do when a command runs but exits unsuccessfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log it, remember it and carry on.
    #[default]
    Continue,
    /// Stop at the first failing command.
    Halt,
}

/// A command that exited unsuccessfully under [`FailurePolicy::Continue`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedStep {
    pub command: String,
    pub code: Option<i32>,
}

pub struct Provisioner<E: Executor> {
    executor: E,
    policy: FailurePolicy,
    failures: Vec<FailedStep>,
    print_banners: bool,
}

impl<E: Executor> Provisioner<E> {
    pub fn new(executor: E, policy: FailurePolicy) -> Self {
        Self {
            executor,
            policy,
            failures: Vec::new(),
            print_banners: true,
        }
    }

    /// Skip banner printing, for callers that only inspect the steps.
    pub fn quiet(mut self) -> Self {
        self.print_banners = false;
        self
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn failures(&self) -> &[FailedStep] {
        &self.failures
    }

    pub fn into_parts(self) -> (E, Vec<FailedStep>) {
        (self.executor, self.failures)
    }

    fn run(&mut self, step: Step) -> Result<()> {
        if self.print_banners {
            print_banner(&step.banner);
        }

        match self.executor.execute(&step)? {
            Outcome::Success => Ok(()),
            Outcome::Failed { code } => {
                let command = step.action.to_string();
                warn!(command = %command, code = ?code, "command exited unsuccessfully");
                match self.policy {
                    FailurePolicy::Halt => Err(VmSetupError::CommandFailed { command, code }),
                    FailurePolicy::Continue => {
                        self.failures.push(FailedStep { command, code });
                        Ok(())
                    }
                }
            }
        }
    }

    fn run_argv(&mut self, banner: String, argv: Vec<String>, cwd: Option<&Path>) -> Result<()> {
        debug!(argv = ?argv, cwd = ?cwd, "queueing command");
        let action = Action::run(argv, cwd.map(Path::to_path_buf))
            .ok_or_else(|| VmSetupError::Validation("empty command".to_string()))?;
        self.run(Step::new(banner, action))
    }

    /// `sudo apt install <package> -y`
    pub fn apt_install(&mut self, package: &str) -> Result<()> {
        self.run_argv(
            msg!(MESSAGES.apt_install_banner, package = package),
            to_argv(["sudo", "apt", "install", package, "-y"]),
            None,
        )
    }

    /// `bash <script>`
    pub fn bash(&mut self, script: &str) -> Result<()> {
        self.run_argv(
            msg!(MESSAGES.bash_banner, script = script),
            to_argv(["bash", script]),
            None,
        )
    }

    /// `git clone` the repository.
    pub fn clone_repo(&mut self, repo: &Repo) -> Result<()> {
        self.run_argv(repo.banner(), repo.clone_command(), None)
    }

    pub fn move_file(&mut self, from: impl Into<PathBuf>, to: impl Into<PathBuf>) -> Result<()> {
        let (from, to) = (from.into(), to.into());
        let banner = msg!(
            MESSAGES.move_banner,
            from = from.display().to_string(),
            to = to.display().to_string()
        );
        self.run(Step::new(banner, Action::Move { from, to }))
    }

    pub fn delete_directory(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let banner = msg!(MESSAGES.delete_directory_banner, path = path.display().to_string());
        self.run(Step::new(banner, Action::RemoveDir { path }))
    }

    pub fn delete_file(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let banner = msg!(MESSAGES.delete_file_banner, path = path.display().to_string());
        self.run(Step::new(banner, Action::RemoveFile { path }))
    }

    /// `python3 <args>`, optionally inside `cwd`.
    pub fn run_python(&mut self, args: &[&str], cwd: Option<&Path>) -> Result<()> {
        let mut argv = vec!["python3".to_string()];
        argv.extend(args.iter().map(|a| a.to_string()));
        self.run_argv(
            msg!(MESSAGES.python_banner, command = args.join(" ")),
            argv,
            cwd,
        )
    }

    /// Run an arbitrary command, optionally inside `cwd`.
    pub fn execute(&mut self, argv: &[&str], cwd: Option<&Path>) -> Result<()> {
        self.run_argv(
            msg!(MESSAGES.execute_banner, command = argv.join(" ")),
            to_argv(argv.iter().copied()),
            cwd,
        )
    }
}

fn to_argv<'a>(parts: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    parts.into_iter().map(str::to_string).collect()
}
