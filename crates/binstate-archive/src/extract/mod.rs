//! Archive extraction support for ZIP and TAR formats.
//!
//! Only regular files and directories are materialized. Symlinks and other
//! special entries are skipped; the installer only ever looks for a single
//! regular file at the top of the extracted tree.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::format::ArchiveKind;
use crate::sanitize::sanitize_path;

#[cfg(feature = "tar")]
mod tar;
#[cfg(feature = "zip")]
mod zip;

/// Extraction results.
#[derive(Debug, Default)]
pub struct Extracted {
    /// Files written, as resolved paths under the destination.
    pub entries:     Vec<PathBuf>,
    pub total_bytes: u64,
}

/// Extract the archive at `archive` into `destination`.
///
/// `kind` comes from [`ArchiveKind::from_filename`]; raw and unsupported
/// assets are rejected.
pub fn extract(archive: &Path, kind: ArchiveKind, destination: &Path) -> Result<Extracted> {
    let file = File::open(archive).map_err(|e| Error::ExtractionFailed {
        path:   archive.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(archive = %archive.display(), ?kind, "extracting");
    match kind {
        #[cfg(feature = "zip")]
        ArchiveKind::Zip => zip::extract(file, destination),
        #[cfg(feature = "tar")]
        ArchiveKind::Tar => tar::extract(file, destination),
        _ => Err(Error::UnsupportedFormat(
            archive
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        )),
    }
}

/// Collects entries written during one extraction.
struct Sink<'a> {
    destination: &'a Path,
    extracted:   Extracted,
}

impl<'a> Sink<'a> {
    fn new(destination: &'a Path) -> Self {
        Self {
            destination,
            extracted: Extracted::default(),
        }
    }

    fn directory(&mut self, entry_path: &Path) -> Result<()> {
        let target = sanitize_path(entry_path, self.destination)?;
        ensure_directory(&target)
    }

    fn file(&mut self, entry_path: &Path, reader: &mut dyn Read, mode: Option<u32>) -> Result<()> {
        let target = sanitize_path(entry_path, self.destination)?;
        if let Some(parent) = target.parent() {
            ensure_directory(parent)?;
        }

        let mut file = File::create(&target).map_err(|e| Error::ExtractionFailed {
            path:   target.clone(),
            source: e,
        })?;
        let written = std::io::copy(reader, &mut file).map_err(|e| Error::ExtractionFailed {
            path:   target.clone(),
            source: e,
        })?;
        apply_mode(&target, mode)?;

        self.extracted.total_bytes += written;
        self.extracted.entries.push(target);
        Ok(())
    }

    fn skip(&self, entry_path: &Path, reason: &str) {
        tracing::debug!(entry = %entry_path.display(), reason, "skipping archive entry");
    }

    fn finish(self) -> Extracted { self.extracted }
}

fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| Error::DirectoryCreationFailed {
            path:   path.to_path_buf(),
            source: e,
        })?;
    }
    Ok(())
}

#[cfg(unix)]
fn apply_mode(path: &Path, mode: Option<u32>) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    if let Some(mode) = mode {
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode & 0o777))?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn apply_mode(_path: &Path, _mode: Option<u32>) -> Result<()> { Ok(()) }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tool");
        std::fs::write(&path, b"binary").unwrap();
        let result = extract(&path, ArchiveKind::Raw, dir.path());
        assert!(matches!(result, Err(Error::UnsupportedFormat(name)) if name == "tool"));
    }

    #[test]
    fn unsupported_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tool.7z");
        std::fs::write(&path, b"7z").unwrap();
        let result = extract(&path, ArchiveKind::Unsupported, dir.path());
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    }

    #[test]
    fn missing_archive_is_extraction_failure() {
        let dir = tempfile::tempdir().unwrap();
        let result = extract(&dir.path().join("nope.zip"), ArchiveKind::Zip, dir.path());
        assert!(matches!(result, Err(Error::ExtractionFailed { .. })));
    }
}
