//! File operations performed in-process rather than through a child process.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, VmSetupError};

/// Resolve where `from` ends up when moved to `to`.
///
/// Moving into an existing directory keeps the file name, like `mv`.
pub fn move_target(from: &Path, to: &Path) -> Result<PathBuf> {
    if to.is_dir() {
        let name = from.file_name().ok_or_else(|| {
            VmSetupError::Filesystem(format!("Cannot move '{}': no file name", from.display()))
        })?;
        Ok(to.join(name))
    } else {
        Ok(to.to_path_buf())
    }
}

/// Move a file, falling back to copy-and-delete when a rename is not possible
/// (for example across filesystems).
pub fn move_file(from: &Path, to: &Path) -> Result<PathBuf> {
    let target = move_target(from, to)?;

    if to.is_dir() && target.exists() {
        return Err(VmSetupError::Filesystem(format!(
            "Destination path '{}' already exists",
            target.display()
        )));
    }

    if let Err(rename_err) = fs::rename(from, &target) {
        if !from.is_file() {
            return Err(VmSetupError::Filesystem(format!(
                "Failed to move '{}' to '{}': {}",
                from.display(),
                target.display(),
                rename_err
            )));
        }
        fs::copy(from, &target).map_err(|e| {
            VmSetupError::Filesystem(format!(
                "Failed to copy '{}' to '{}': {}",
                from.display(),
                target.display(),
                e
            ))
        })?;
        fs::remove_file(from)?;
    }

    Ok(target)
}

/// Recursively delete a directory.
pub fn remove_dir(path: &Path) -> Result<()> {
    fs::remove_dir_all(path).map_err(|e| {
        VmSetupError::Filesystem(format!("Failed to delete directory '{}': {}", path.display(), e))
    })
}

/// Delete a single file.
pub fn remove_file(path: &Path) -> Result<()> {
    fs::remove_file(path).map_err(|e| {
        VmSetupError::Filesystem(format!("Failed to delete file '{}': {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_move_into_directory_keeps_name() {
        let temp = tempdir().unwrap();
        let src_dir = temp.path().join("scratch");
        let home = temp.path().join("home");
        fs::create_dir_all(&src_dir).unwrap();
        fs::create_dir_all(&home).unwrap();
        let vimrc = src_dir.join(".vimrc");
        fs::write(&vimrc, "set nocompatible").unwrap();

        let moved = move_file(&vimrc, &home).unwrap();

        assert_eq!(moved, home.join(".vimrc"));
        assert!(!vimrc.exists());
        assert_eq!(fs::read_to_string(&moved).unwrap(), "set nocompatible");
    }

    #[test]
    fn test_move_to_explicit_path() {
        let temp = tempdir().unwrap();
        let from = temp.path().join("a.txt");
        let to = temp.path().join("b.txt");
        fs::write(&from, "x").unwrap();

        let moved = move_file(&from, &to).unwrap();
        assert_eq!(moved, to);
        assert!(to.exists());
        assert!(!from.exists());
    }

    #[test]
    fn test_move_refuses_to_clobber_inside_directory() {
        let temp = tempdir().unwrap();
        let home = temp.path().join("home");
        fs::create_dir_all(&home).unwrap();
        fs::write(home.join(".vimrc"), "old").unwrap();
        let from = temp.path().join(".vimrc");
        fs::write(&from, "new").unwrap();

        let result = move_file(&from, &home);
        assert!(matches!(result, Err(VmSetupError::Filesystem(_))));
        assert_eq!(fs::read_to_string(home.join(".vimrc")).unwrap(), "old");
        assert!(from.exists());
    }

    #[test]
    fn test_move_missing_source_fails() {
        let temp = tempdir().unwrap();
        let result = move_file(&temp.path().join("nope"), &temp.path().join("dest"));
        assert!(result.is_err());
    }

    #[test]
    fn test_remove_dir_and_file() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("opt/venv/bin");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("pip"), "").unwrap();
        let file = temp.path().join("virtualenv.pyz");
        fs::write(&file, "").unwrap();

        remove_dir(&temp.path().join("opt")).unwrap();
        remove_file(&file).unwrap();

        assert!(!temp.path().join("opt").exists());
        assert!(!file.exists());
    }

    #[test]
    fn test_remove_missing_paths_fail() {
        let temp = tempdir().unwrap();
        assert!(remove_dir(&temp.path().join("missing")).is_err());
        assert!(remove_file(&temp.path().join("missing")).is_err());
    }
}
