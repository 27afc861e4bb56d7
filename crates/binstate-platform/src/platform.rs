//! Normalized `(os, arch)` pair used to pick a release asset.

use std::fmt;

use once_cell::sync::Lazy;

use crate::{arch, os};

static HOST: Lazy<Platform> = Lazy::new(|| Platform {
    os:   os::detect(),
    arch: arch::detect(),
});

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Platform {
    os:   String,
    arch: String,
}

impl Platform {
    /// Build a platform from raw, host-style names. Both are normalized.
    pub fn new(os: impl AsRef<str>, arch: impl AsRef<str>) -> Self {
        Self {
            os:   os::normalize(os.as_ref()),
            arch: arch::normalize(arch.as_ref()),
        }
    }

    /// The platform of the running host.
    pub fn host() -> Self { HOST.clone() }

    pub fn os(&self) -> &str { &self.os }

    pub fn arch(&self) -> &str { &self.arch }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalizes_both_parts() {
        let p = Platform::new("Linux", "aarch64");
        assert_eq!(p.os(), "linux");
        assert_eq!(p.arch(), "arm64");
    }

    #[test]
    fn x86_64_passes_through() {
        let p = Platform::new("Darwin", "x86_64");
        assert_eq!(p.os(), "darwin");
        assert_eq!(p.arch(), "x86_64");
    }

    #[test]
    fn display() {
        assert_eq!(Platform::new("linux", "amd64").to_string(), "linux/amd64");
    }

    #[test]
    fn host_is_stable() {
        assert_eq!(Platform::host(), Platform::host());
    }
}
