//! Static asset copying.

use std::fs;
use std::path::Path;

use crate::error::BuildError;

/// Replace `dest` with a recursive copy of `src`.
///
/// `dest` is removed first if it exists. A missing `src` leaves `dest` empty.
/// Returns the number of files copied.
///
/// # Errors
///
/// Returns [`BuildError::Io`] naming the path that failed.
pub fn copy_static(src: &Path, dest: &Path) -> Result<usize, BuildError> {
    if dest.exists() {
        tracing::debug!(path = %dest.display(), "Removing output directory");
        fs::remove_dir_all(dest).map_err(|e| BuildError::io(dest, e))?;
    }
    fs::create_dir_all(dest).map_err(|e| BuildError::io(dest, e))?;

    if !src.is_dir() {
        tracing::warn!(path = %src.display(), "Static directory not found, skipping");
        return Ok(0);
    }

    copy_dir(src, dest)
}

fn copy_dir(src: &Path, dest: &Path) -> Result<usize, BuildError> {
    let mut copied = 0;
    let entries = fs::read_dir(src).map_err(|e| BuildError::io(src, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| BuildError::io(src, e))?;
        let from = entry.path();
        let to = dest.join(entry.file_name());
        let file_type = entry.file_type().map_err(|e| BuildError::io(&from, e))?;

        if file_type.is_dir() {
            fs::create_dir_all(&to).map_err(|e| BuildError::io(&to, e))?;
            copied += copy_dir(&from, &to)?;
        } else {
            tracing::debug!(from = %from.display(), to = %to.display(), "Copying static file");
            fs::copy(&from, &to).map_err(|e| BuildError::io(&to, e))?;
            copied += 1;
        }
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_nested_tree() {
        let temp_dir = tempfile::tempdir().unwrap();
        let src = temp_dir.path().join("static");
        let dest = temp_dir.path().join("public");
        fs::create_dir_all(src.join("images")).unwrap();
        fs::write(src.join("index.css"), "body {}").unwrap();
        fs::write(src.join("images/logo.png"), [0u8, 1, 2]).unwrap();

        let copied = copy_static(&src, &dest).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(fs::read_to_string(dest.join("index.css")).unwrap(), "body {}");
        assert_eq!(fs::read(dest.join("images/logo.png")).unwrap(), vec![0u8, 1, 2]);
    }

    #[test]
    fn clears_previous_output() {
        let temp_dir = tempfile::tempdir().unwrap();
        let src = temp_dir.path().join("static");
        let dest = temp_dir.path().join("public");
        fs::create_dir_all(&src).unwrap();
        fs::create_dir_all(&dest).unwrap();
        fs::write(dest.join("stale.html"), "old").unwrap();

        copy_static(&src, &dest).unwrap();

        assert!(dest.is_dir());
        assert!(!dest.join("stale.html").exists());
    }

    #[test]
    fn missing_source_leaves_empty_output() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dest = temp_dir.path().join("public");

        let copied = copy_static(&temp_dir.path().join("missing"), &dest).unwrap();

        assert_eq!(copied, 0);
        assert!(dest.is_dir());
        assert_eq!(fs::read_dir(&dest).unwrap().count(), 0);
    }
}
