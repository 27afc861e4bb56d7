use std::fs;
use std::path::{Path, PathBuf};

use binstate_archive::ArchiveKind;
use binstate_fetch::HttpClient;
use tempfile::TempDir;

use crate::error::{Error, Result};

#[cfg(unix)]
const EXECUTABLE_MODE: u32 = 0o755;

/// Manages the single file `<dir>/<name>`.
#[derive(Debug, Clone)]
pub struct Installer {
    name:      String,
    path:      PathBuf,
    temp_root: Option<PathBuf>,
}

impl Installer {
    pub fn new(dir: impl AsRef<Path>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            path: dir.as_ref().join(&name),
            name,
            temp_root: None,
        }
    }

    /// Create temporary workspaces under `root` instead of the system temp dir.
    #[must_use]
    pub fn temp_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(root.into());
        self
    }

    pub fn name(&self) -> &str { &self.name }

    /// Destination of the managed binary.
    pub fn path(&self) -> &Path { &self.path }

    /// Whether a regular file exists at the destination.
    pub fn is_installed(&self) -> bool { self.path.is_file() }

    /// Download `url` and install the binary it contains.
    ///
    /// The asset's filename decides how it is unpacked: no extension means
    /// the asset is the binary, `.zip` and `.tar.*` are extracted and must
    /// carry the binary at their top level under the package name.
    pub fn install(&self, client: &dyn HttpClient, url: &str) -> Result<PathBuf> {
        let filename = asset_filename(url).ok_or_else(|| Error::InvalidUrl(url.to_string()))?;
        let workspace = self.workspace()?;
        let asset = workspace.path().join(filename);

        tracing::info!(package = %self.name, url, "downloading");
        let bytes = client.download(url, &asset).map_err(Error::Download)?;
        tracing::debug!(asset = %asset.display(), bytes, "downloaded");

        let binary = match ArchiveKind::from_filename(filename) {
            ArchiveKind::Raw => asset,
            kind => {
                let extracted = binstate_archive::extract(&asset, kind, workspace.path()).map_err(|source| {
                    Error::Extraction {
                        asset: filename.to_string(),
                        source,
                    }
                })?;
                tracing::debug!(entries = extracted.entries.len(), "extracted");
                workspace.path().join(&self.name)
            }
        };

        self.place(&binary)?;
        tracing::info!(package = %self.name, path = %self.path.display(), "installed");
        Ok(self.path.clone())
    }

    /// Remove the managed binary.
    pub fn uninstall(&self) -> Result<()> {
        fs::remove_file(&self.path).map_err(|source| Error::Remove {
            path: self.path.clone(),
            source,
        })?;
        tracing::info!(package = %self.name, path = %self.path.display(), "removed");
        Ok(())
    }

    fn workspace(&self) -> Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("binstate-");
        match &self.temp_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
        .map_err(Error::Workspace)
    }

    fn place(&self, binary: &Path) -> Result<()> {
        if !binary.is_file() {
            return Err(Error::BinaryNotFound(binary.to_path_buf()));
        }

        fs::copy(binary, &self.path).map_err(|source| Error::Place {
            path: self.path.clone(),
            source,
        })?;
        set_executable(&self.path)
    }
}

#[cfg(unix)]
fn set_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(EXECUTABLE_MODE)).map_err(|source| Error::Permissions {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> Result<()> { Ok(()) }

/// Last path segment of `url`, without query or fragment.
pub fn asset_filename(url: &str) -> Option<&str> {
    let end = url.find(|c| c == '?' || c == '#').unwrap_or(url.len());
    url[..end].rsplit('/').next().filter(|name| !name.is_empty())
}
