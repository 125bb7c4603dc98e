//! Optional `vmsetup.yaml` overriding the built-in provisioning values.
//!
//! Every field has a default, so an absent file and an empty file both
//! produce the stock configuration.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;
use vmsetup_core::error::{Result, VmSetupError};
use vmsetup_core::user::validate_login_name;

use crate::yaml_utils::read_optional_yaml_file;

pub const DEFAULT_SETTINGS_FILE: &str = "vmsetup.yaml";

/// Root structure for the settings file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Login name to provision. Defaults to the invoking user.
    #[serde(default)]
    pub user: Option<String>,

    #[serde(default)]
    pub git: GitIdentity,

    #[serde(default)]
    pub dotfiles: DotfilesRepo,

    #[serde(default)]
    pub guest_additions: GuestAdditions,
}

/// Global git identity written with `git config --global`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GitIdentity {
    #[serde(default = "default_git_name")]
    pub name: String,
    #[serde(default = "default_git_email")]
    pub email: String,
}

fn default_git_name() -> String {
    "SiQube".to_string()
}

fn default_git_email() -> String {
    "reich.davidr@gmail.com".to_string()
}

impl Default for GitIdentity {
    fn default() -> Self {
        Self {
            name: default_git_name(),
            email: default_git_email(),
        }
    }
}

/// GitHub repository holding the vim configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DotfilesRepo {
    #[serde(default = "default_dotfiles_owner")]
    pub owner: String,
    #[serde(default = "default_dotfiles_repo")]
    pub repo: String,
}

fn default_dotfiles_owner() -> String {
    "siqube".to_string()
}

fn default_dotfiles_repo() -> String {
    "scratch".to_string()
}

impl Default for DotfilesRepo {
    fn default() -> Self {
        Self {
            owner: default_dotfiles_owner(),
            repo: default_dotfiles_repo(),
        }
    }
}

/// Location of the mounted guest-additions medium, below `/media/<user>/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GuestAdditions {
    #[serde(default = "default_media_dir")]
    pub media_dir: String,
}

fn default_media_dir() -> String {
    "VBox_GAs_7.0.12".to_string()
}

impl Default for GuestAdditions {
    fn default() -> Self {
        Self {
            media_dir: default_media_dir(),
        }
    }
}

impl Settings {
    /// Load settings.
    ///
    /// An explicit path must exist. Without one, `vmsetup.yaml` in `cwd` is
    /// used when present and the defaults otherwise.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = cwd.join(DEFAULT_SETTINGS_FILE);
                if !candidate.is_file() {
                    debug!("no settings file, using defaults");
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let settings: Option<Settings> = read_optional_yaml_file(&path)
            .map_err(|e| VmSetupError::Config(format!("{:#}", e)))?;
        let settings = settings.unwrap_or_default();
        settings.validate()?;

        debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Reject values that would produce malformed commands.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("git.name", &self.git.name),
            ("git.email", &self.git.email),
            ("dotfiles.owner", &self.dotfiles.owner),
            ("dotfiles.repo", &self.dotfiles.repo),
            ("guest_additions.media_dir", &self.guest_additions.media_dir),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(VmSetupError::Validation(format!("{} cannot be empty", field)));
            }
        }

        let path_like = [
            ("dotfiles.owner", &self.dotfiles.owner),
            ("dotfiles.repo", &self.dotfiles.repo),
            ("guest_additions.media_dir", &self.guest_additions.media_dir),
        ];
        for (field, value) in path_like {
            let escapes = value == "." || value == "..";
            if escapes || value.contains(|c: char| c == '/' || c.is_whitespace()) {
                return Err(VmSetupError::Validation(format!(
                    "{} must be a single path component, got '{}'",
                    field, value
                )));
            }
        }

        if let Some(user) = &self.user {
            validate_login_name(user)?;
        }

        Ok(())
    }
}
