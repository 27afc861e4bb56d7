//! Vendor catalog releases.

use binstate_platform::Platform;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::release::ReleaseSource;

pub const DEFAULT_API: &str = "https://api.releases.hashicorp.com/v1/releases/";

#[derive(Debug, Clone, Deserialize)]
pub struct HashicorpRelease {
    pub version: String,
    #[serde(default)]
    pub builds:  Vec<Build>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Build {
    pub os:   String,
    pub arch: String,
    pub url:  String,
}

#[derive(Debug, Clone)]
pub struct HashicorpSource {
    product:  String,
    api_base: String,
}

impl HashicorpSource {
    /// `product` is both the catalog key and the binary name.
    pub fn new(product: impl Into<String>) -> Self {
        Self {
            product:  product.into(),
            api_base: DEFAULT_API.to_string(),
        }
    }

    #[must_use]
    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = crate::with_trailing_slash(base);
        self
    }
}

impl ReleaseSource for HashicorpSource {
    type Release = HashicorpRelease;

    fn describe(&self) -> String { format!("hashicorp:{}", self.product) }

    fn latest_url(&self) -> String { format!("{}{}/latest", self.api_base, self.product) }

    fn latest_version(&self, release: &HashicorpRelease) -> Result<String> { Ok(release.version.clone()) }

    fn select_download_url(&self, release: &HashicorpRelease, platform: &Platform) -> Result<String> {
        select_build(&release.builds, platform)
            .map(|build| build.url.clone())
            .ok_or_else(|| Error::NoInstallationCandidate {
                platform: platform.to_string(),
            })
    }
}

/// First build whose `os` and `arch` equal the platform's exactly.
pub fn select_build<'a>(builds: &'a [Build], platform: &Platform) -> Option<&'a Build> {
    builds
        .iter()
        .find(|build| build.os == platform.os() && build.arch == platform.arch())
}
