use std::fs;
use std::path::Path;

use log::info;

use crate::config::defs::PipelineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirStatus {
    Existing,
    Created,
}

/// Makes sure `path` is a usable directory, creating it and any missing ancestors.
/// Ancestors that already exist are fine; anything at `path` that is not a directory is not.
///
/// # Arguments
///
/// * `label` - Name used for the path in diagnostics.
/// * `path` - Directory to check.
///
/// # Returns
/// DirStatus telling whether the directory had to be created.
///
pub fn ensure_dir(label: &'static str, path: &Path) -> Result<DirStatus, PipelineError> {
    if path.exists() && !path.is_dir() {
        return Err(PipelineError::PathIsFile { label, path: path.to_path_buf() });
    }
    if path.is_dir() {
        return Ok(DirStatus::Existing);
    }

    info!("{} '{}' does not exist, creating path", label, path.display());
    fs::create_dir_all(path)?;
    Ok(DirStatus::Created)
}

/// Like `ensure_dir`, but for directories that must already hold externally supplied data.
pub fn require_dir(label: &'static str, path: &Path) -> Result<(), PipelineError> {
    if path.exists() && !path.is_dir() {
        return Err(PipelineError::PathIsFile { label, path: path.to_path_buf() });
    }
    if !path.is_dir() {
        return Err(PipelineError::MissingDirectory { label, path: path.to_path_buf() });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_dir_creates_ancestors() -> anyhow::Result<()> {
        let tmp = tempdir()?;
        let nested = tmp.path().join("a").join("b").join("c");

        assert_eq!(ensure_dir("NestedPath", &nested)?, DirStatus::Created);
        assert!(nested.is_dir());
        assert_eq!(ensure_dir("NestedPath", &nested)?, DirStatus::Existing);
        Ok(())
    }

    #[test]
    fn test_ensure_dir_rejects_file() -> anyhow::Result<()> {
        let tmp = tempdir()?;
        let file_path = tmp.path().join("Filtered");
        fs::write(&file_path, b"not a directory")?;

        let err = ensure_dir("FilterPath", &file_path).unwrap_err();
        assert!(matches!(err, PipelineError::PathIsFile { label: "FilterPath", .. }));
        assert!(err.to_string().contains("exists but is a file"));
        Ok(())
    }

    #[test]
    fn test_require_dir() -> anyhow::Result<()> {
        let tmp = tempdir()?;
        let missing = tmp.path().join("Data");
        assert!(matches!(
            require_dir("SrcReadsPath", &missing),
            Err(PipelineError::MissingDirectory { .. })
        ));
        assert!(!missing.exists());

        fs::create_dir(&missing)?;
        require_dir("SrcReadsPath", &missing)?;
        Ok(())
    }
}
