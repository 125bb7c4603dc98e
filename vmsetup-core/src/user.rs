//! The account being provisioned.

use std::path::{Path, PathBuf};

use crate::error::{Result, VmSetupError};

/// Login name plus the home directory derived from it.
///
/// The home directory is always `/home/<name>`; the passwd home is not
/// consulted so that root-run provisioning still targets the named user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    name: String,
    home: PathBuf,
}

impl UserIdentity {
    /// Build the identity for `name`, rejecting names that would place the
    /// home directory anywhere but directly below `/home`.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_login_name(&name)?;
        let home = PathBuf::from(format!("/home/{name}"));
        Ok(Self { name, home })
    }

    /// Look up the login name of the real user id.
    #[cfg(unix)]
    pub fn current() -> Result<Self> {
        use nix::unistd::{getuid, User};

        let uid = getuid();
        let user = User::from_uid(uid)
            .map_err(|e| VmSetupError::User(format!("passwd lookup for uid {uid} failed: {e}")))?
            .ok_or_else(|| VmSetupError::User(format!("no passwd entry for uid {uid}")))?;
        Self::new(user.name)
    }

    #[cfg(not(unix))]
    pub fn current() -> Result<Self> {
        std::env::var("USERNAME")
            .or_else(|_| std::env::var("USER"))
            .map_err(|_| VmSetupError::User("could not determine the current user".to_string()))
            .and_then(Self::new)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    /// A path below the user's home directory.
    pub fn home_path(&self, relative: &str) -> PathBuf {
        self.home.join(relative)
    }
}

/// Check that `name` is usable as a single path component below `/home`.
pub fn validate_login_name(name: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(|c: char| c == '/' || c == '{' || c == '}' || c.is_whitespace());
    if invalid {
        return Err(VmSetupError::Validation(format!(
            "user '{}' is not a valid login name",
            name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_is_derived_from_name() {
        let user = UserIdentity::new("developer").unwrap();
        assert_eq!(user.name(), "developer");
        assert_eq!(user.home(), Path::new("/home/developer"));
        assert_eq!(
            user.home_path(".vim/bundle"),
            PathBuf::from("/home/developer/.vim/bundle")
        );
    }

    #[test]
    #[cfg(unix)]
    fn test_current_user_resolves() {
        let user = UserIdentity::current().unwrap();
        assert!(!user.name().is_empty());
        assert!(user.home().starts_with("/home"));
    }

    #[test]
    fn test_rejects_names_that_escape_home() {
        for name in ["", ".", "..", "../etc", "a/b", "dev user", "{to}", "dev\t"] {
            assert!(
                matches!(UserIdentity::new(name), Err(VmSetupError::Validation(_))),
                "accepted {:?}",
                name
            );
        }
    }

    #[test]
    fn test_accepts_ordinary_login_names() {
        for name in ["developer", "dev.user", "dev-user_2", "..hidden"] {
            assert!(validate_login_name(name).is_ok(), "rejected {:?}", name);
        }
    }
}
