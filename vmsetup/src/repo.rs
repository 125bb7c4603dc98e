//! GitHub repository descriptor used for clone steps.

use std::fmt;
use std::path::PathBuf;

use vmsetup_messages::{msg, MESSAGES};

/// `owner/name` on GitHub, optionally cloned into an explicit destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repo {
    owner: String,
    name: String,
    destination: Option<PathBuf>,
}

impl Repo {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            destination: None,
        }
    }

    pub fn with_destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// SSH clone URL.
    pub fn url(&self) -> String {
        format!("git@github.com:{}", self)
    }

    /// `git clone <url> [<destination>]`
    pub fn clone_command(&self) -> Vec<String> {
        let mut argv = vec!["git".to_string(), "clone".to_string(), self.url()];
        if let Some(destination) = &self.destination {
            argv.push(destination.display().to_string());
        }
        argv
    }

    /// Banner announcing the clone.
    pub fn banner(&self) -> String {
        match &self.destination {
            Some(destination) => msg!(
                MESSAGES.clone_to_banner,
                repo = self.to_string(),
                destination = destination.display().to_string()
            ),
            None => msg!(MESSAGES.clone_banner, repo = self.to_string()),
        }
    }
}

impl fmt::Display for Repo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
