//! The unit of work handed to an [`Executor`](crate::Executor).
//!
//! A step pairs the banner printed before it runs with the side effect it
//! performs. Steps are plain values so a full provisioning run can be
//! recorded and compared without touching the system.

use std::fmt;
use std::path::PathBuf;

/// A side effect issued to the operating system or an external tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Spawn `program` with `args`, optionally inside `cwd`.
    Run {
        program: String,
        args: Vec<String>,
        cwd: Option<PathBuf>,
    },
    /// Move a file. When `to` is an existing directory the file keeps its name.
    Move { from: PathBuf, to: PathBuf },
    /// Recursively delete a directory.
    RemoveDir { path: PathBuf },
    /// Delete a single file.
    RemoveFile { path: PathBuf },
}

impl Action {
    /// Build a `Run` action from a full argument vector (program first).
    ///
    /// Returns `None` for an empty vector.
    pub fn run<I, S>(argv: I, cwd: Option<PathBuf>) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut argv = argv.into_iter().map(Into::into);
        let program = argv.next()?;
        Some(Action::Run {
            program,
            args: argv.collect(),
            cwd,
        })
    }

    /// Program and arguments of a `Run` action, as one vector.
    pub fn argv(&self) -> Option<Vec<&str>> {
        match self {
            Action::Run { program, args, .. } => Some(
                std::iter::once(program.as_str())
                    .chain(args.iter().map(String::as_str))
                    .collect(),
            ),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Run { program, args, cwd } => {
                write!(f, "{}", program)?;
                for arg in args {
                    write!(f, " {}", arg)?;
                }
                if let Some(cwd) = cwd {
                    write!(f, " (in {})", cwd.display())?;
                }
                Ok(())
            }
            Action::Move { from, to } => write!(f, "mv {} {}", from.display(), to.display()),
            Action::RemoveDir { path } => write!(f, "rm -r {}", path.display()),
            Action::RemoveFile { path } => write!(f, "rm {}", path.display()),
        }
    }
}

/// A banner line plus the action it announces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub banner: String,
    pub action: Action,
}

impl Step {
    pub fn new(banner: impl Into<String>, action: Action) -> Self {
        Self {
            banner: banner.into(),
            action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_splits_program_from_args() {
        let action = Action::run(["sudo", "apt", "update", "-y"], None).unwrap();
        match &action {
            Action::Run { program, args, cwd } => {
                assert_eq!(program, "sudo");
                assert_eq!(args, &["apt", "update", "-y"]);
                assert!(cwd.is_none());
            }
            other => panic!("unexpected action {:?}", other),
        }
        assert_eq!(action.argv().unwrap(), vec!["sudo", "apt", "update", "-y"]);
    }

    #[test]
    fn test_run_rejects_empty_argv() {
        assert!(Action::run(Vec::<String>::new(), None).is_none());
    }

    #[test]
    fn test_display_forms() {
        let run = Action::run(["git", "submodule", "update"], Some(PathBuf::from("/src/ycm")))
            .unwrap();
        assert_eq!(run.to_string(), "git submodule update (in /src/ycm)");

        let mv = Action::Move {
            from: PathBuf::from("scratch/.vimrc"),
            to: PathBuf::from("/home/dev"),
        };
        assert_eq!(mv.to_string(), "mv scratch/.vimrc /home/dev");
        assert!(mv.argv().is_none());

        let rm = Action::RemoveDir {
            path: PathBuf::from("scratch"),
        };
        assert_eq!(rm.to_string(), "rm -r scratch");
    }
}
