//! Configuration inputs for vmsetup.
//!
//! Two files feed a provisioning run: the required list of Python versions
//! and an optional settings file that overrides the built-in identity,
//! dotfiles repository and guest-additions location.

pub mod python_versions;
pub mod settings;
pub mod yaml_utils;

pub use python_versions::{load_python_versions, PythonVersion, DEFAULT_VERSIONS_FILE};
pub use settings::{DotfilesRepo, GitIdentity, GuestAdditions, Settings, DEFAULT_SETTINGS_FILE};
