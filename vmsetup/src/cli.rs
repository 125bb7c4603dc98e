use std::path::PathBuf;

use clap::Parser;
use vmsetup_config::{Settings, DEFAULT_VERSIONS_FILE};
use vmsetup_core::error::Result;
use vmsetup_core::user::UserIdentity;

use crate::procedure::Flags;
use crate::provisioner::FailurePolicy;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Run the VirtualBox guest-additions installer at the end
    #[arg(long, short = 'i')]
    pub install_guest_edition: bool,

    /// Remove the vim and virtualenv installs right after creating them
    #[arg(long)]
    pub testing: bool,

    /// Delete artifacts of a previous run before provisioning
    #[arg(long)]
    pub clean_up: bool,

    /// Stop at the first command that exits unsuccessfully
    #[arg(long)]
    pub strict: bool,

    /// Print the steps without running anything
    #[arg(long)]
    pub dry_run: bool,

    /// YAML list of Python versions to install
    #[arg(long, default_value = DEFAULT_VERSIONS_FILE)]
    pub versions_file: PathBuf,

    /// Settings file (defaults to ./vmsetup.yaml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// User to provision instead of the invoking one
    #[arg(long)]
    pub user: Option<String>,
}

impl Args {
    pub fn flags(&self) -> Flags {
        Flags {
            clean_up: self.clean_up,
            testing: self.testing,
            install_guest_edition: self.install_guest_edition,
        }
    }

    /// The account to provision: `--user`, then the settings file, then the
    /// invoking user. Every source goes through the same login-name check.
    pub fn resolve_user(&self, settings: &Settings) -> Result<UserIdentity> {
        match self.user.as_deref().or(settings.user.as_deref()) {
            Some(name) => UserIdentity::new(name),
            None => UserIdentity::current(),
        }
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        if self.strict {
            FailurePolicy::Halt
        } else {
            FailurePolicy::Continue
        }
    }
}
