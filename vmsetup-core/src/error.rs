use std::fmt::{self, Display, Formatter};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VmSetupError {
    Config(String),
    Validation(String),
    Io(#[from] std::io::Error),
    Command(String),
    CommandFailed {
        command: String,
        code: Option<i32>,
    },
    Filesystem(String),
    User(String),
}

impl Display for VmSetupError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            VmSetupError::Config(s) => write!(f, "Configuration error: {}", s),
            VmSetupError::Validation(s) => write!(f, "Validation error: {}", s),
            VmSetupError::Io(e) => write!(f, "I/O error: {}", e),
            VmSetupError::Command(s) => write!(f, "Command failed to start: {}", s),
            VmSetupError::CommandFailed { command, code } => {
                match code {
                    Some(code) => write!(f, "Command exited with status {}: {}", code, command)?,
                    None => write!(f, "Command terminated by signal: {}", command)?,
                }
                write!(f, "\n\nFix:\n")?;
                write!(f, "  • Inspect the output above for the failing tool's message\n")?;
                write!(f, "  • Re-run without --strict to continue past failures")
            }
            VmSetupError::Filesystem(s) => write!(f, "Filesystem error: {}", s),
            VmSetupError::User(s) => write!(f, "User lookup error: {}", s),
        }
    }
}

pub type Result<T> = std::result::Result<T, VmSetupError>;
