use std::path::PathBuf;

use binstate_fetch::HttpClient;
use binstate_install::Installer;
use binstate_platform::Platform;
use binstate_source::{CachedSource, ReleaseSource};

use crate::error::{Error, Result};
use crate::oracle::{VersionOracle, VersionStatus};
use crate::outcome::InstallOutcome;
use crate::package::{DesiredState, PackageSpec};

/// One reconciliation run for one binary.
///
/// Metadata, downloads and the version probe are all lazy: a run touches
/// the network or spawns the binary only when its decision needs it.
/// [`run`](Self::run) consumes the reconciler, so cached metadata and
/// version output never outlive the run.
pub struct Reconciler<S: ReleaseSource, C: HttpClient> {
    spec:      PackageSpec,
    source:    CachedSource<S>,
    client:    C,
    installer: Installer,
    oracle:    VersionOracle,
    platform:  Platform,
}

impl<S: ReleaseSource, C: HttpClient> Reconciler<S, C> {
    pub fn new(spec: PackageSpec, source: S, client: C) -> Self {
        Self {
            installer: Installer::new(spec.install_dir(), spec.name()),
            oracle: VersionOracle::new(spec.binary_path(), spec.version_flag().iter().cloned()),
            source: CachedSource::new(source),
            platform: Platform::host(),
            spec,
            client,
        }
    }

    /// Select assets for `platform` instead of the host.
    #[must_use]
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Place temporary download workspaces under `root`.
    #[must_use]
    pub fn temp_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.installer = self.installer.temp_root(root);
        self
    }

    pub fn run(mut self, state: DesiredState) -> InstallOutcome {
        let mut outcome = InstallOutcome::default();
        let installed = self.installer.is_installed();
        tracing::debug!(
            package = self.spec.name(),
            %state,
            installed,
            source = %self.source.source().describe(),
            "reconciling"
        );

        match state {
            DesiredState::Present => {
                if !installed {
                    self.install(&mut outcome);
                }
            }
            DesiredState::Latest => {
                if !installed || self.version_status(&mut outcome) != VersionStatus::Latest {
                    self.install(&mut outcome);
                }
            }
            DesiredState::Absent => {
                if installed {
                    outcome.changed = true;
                    if let Err(e) = self.installer.uninstall() {
                        tracing::warn!(package = self.spec.name(), error = %e, "removal failed");
                        outcome.fail(e);
                    }
                }
            }
        }

        tracing::info!(
            package = self.spec.name(),
            %state,
            changed = outcome.changed,
            failed = outcome.failed,
            "reconciled"
        );
        outcome
    }

    /// Compare the installed binary with the latest release.
    ///
    /// Lookup and probe failures are recorded on `outcome` and yield
    /// [`VersionStatus::Unknown`]. The binary is not spawned when the latest
    /// version itself is unavailable.
    fn version_status(&mut self, outcome: &mut InstallOutcome) -> VersionStatus {
        let latest = match self.source.latest_version(&self.client) {
            Ok(latest) => latest,
            Err(e) => {
                outcome.fail(e);
                return VersionStatus::Unknown;
            }
        };

        let status = match self.oracle.is_latest(&latest) {
            Ok(true) => VersionStatus::Latest,
            Ok(false) => VersionStatus::Outdated,
            Err(e) => {
                outcome.fail(e);
                VersionStatus::Unknown
            }
        };
        tracing::debug!(package = self.spec.name(), %latest, ?status, "version compared");
        status
    }

    /// Download and place the asset for the current platform.
    ///
    /// Entering this routine always counts as a change, even when it fails.
    fn install(&mut self, outcome: &mut InstallOutcome) {
        outcome.changed = true;
        if let Err(e) = self.try_install() {
            tracing::warn!(package = self.spec.name(), error = %e, "install failed");
            outcome.fail(e);
        }
    }

    fn try_install(&mut self) -> Result<PathBuf> {
        let url = self.source.download_url(&self.client, &self.platform)?;
        self.installer.install(&self.client, &url).map_err(Error::from)
    }
}
