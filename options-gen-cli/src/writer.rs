//! Output file writer.
//!
//! Writing happens only after the whole pipeline has succeeded, so a failed
//! run never clobbers a previously generated file. Generated files are
//! marked non-executable.

use std::fs;
use std::path::Path;

use crate::error::WriteError;

/// Write the generated source to `path` and return the byte count.
pub fn write_output(path: &Path, content: &str) -> Result<usize, WriteError> {
    fs::write(path, content).map_err(|source| WriteError::WriteFile {
        path: path.to_path_buf(),
        source,
    })?;

    set_permissions(path)?;

    Ok(content.len())
}

#[cfg(unix)]
fn set_permissions(path: &Path) -> Result<(), WriteError> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o644)).map_err(|source| {
        WriteError::SetPermissions {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(not(unix))]
fn set_permissions(_path: &Path) -> Result<(), WriteError> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_output() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("options_generated.rs");
        let content = "// generated\n";

        let bytes = write_output(&path, content).unwrap();
        assert_eq!(bytes, content.len());
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }

    #[cfg(unix)]
    #[test]
    fn test_output_is_not_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("options_generated.rs");
        write_output(&path, "// generated\n").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope").join("options_generated.rs");

        let err = write_output(&path, "// generated\n").unwrap_err();
        assert!(matches!(err, WriteError::WriteFile { .. }));
    }
}
