use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Resolve an archive entry path under `base`, rejecting anything that would
/// land outside it.
pub fn sanitize_path(entry_path: &Path, base: &Path) -> Result<PathBuf> {
    let normalized = normalize_path(entry_path)?;

    // Reject absolute paths (zip-slip protection)
    if normalized.is_absolute() {
        return Err(Error::ZipSlip {
            entry:    entry_path.to_path_buf(),
            resolved: normalized,
        });
    }

    let resolved = base.join(normalized);
    if !resolved.starts_with(base) {
        return Err(Error::ZipSlip {
            entry: entry_path.to_path_buf(),
            resolved,
        });
    }

    Ok(resolved)
}

/// Lexically normalize `path`, folding `.` and `..`.
///
/// A `..` that climbs above the first component is a zip-slip attempt.
fn normalize_path(path: &Path) -> Result<PathBuf> {
    if path.as_os_str().is_empty() || path.to_string_lossy().contains('\0') {
        return Err(Error::InvalidPath(path.to_path_buf()));
    }

    let mut normalized = PathBuf::new();
    let mut depth = 0usize;
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if depth == 0 {
                    return Err(Error::ZipSlip {
                        entry:    path.to_path_buf(),
                        resolved: normalized.join(".."),
                    });
                }
                normalized.pop();
                depth -= 1;
            }
            Component::Normal(part) => {
                normalized.push(part);
                depth += 1;
            }
        }
    }
    Ok(normalized)
}
