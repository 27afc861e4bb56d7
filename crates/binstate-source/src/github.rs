//! Repository-hosted releases.

use binstate_fetch::Header;
use binstate_platform::Platform;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::release::ReleaseSource;

pub const DEFAULT_API: &str = "https://api.github.com/repos/";

#[derive(Debug, Clone, Deserialize)]
pub struct GithubRelease {
    /// Release title; this is what is matched against `--version` output.
    #[serde(default)]
    pub name:     Option<String>,
    #[serde(default)]
    pub tag_name: Option<String>,
    #[serde(default)]
    pub assets:   Vec<GithubAsset>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GithubAsset {
    pub name:                 String,
    pub browser_download_url: String,
}

#[derive(Debug, Clone)]
pub struct GithubSource {
    name:     String,
    repo:     String,
    api_base: String,
    token:    Option<String>,
}

impl GithubSource {
    /// `name` is the binary to look for in asset names, `repo` is `owner/repo`.
    pub fn new(name: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            name:     name.into(),
            repo:     repo.into(),
            api_base: DEFAULT_API.to_string(),
            token:    None,
        }
    }

    #[must_use]
    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = crate::with_trailing_slash(base);
        self
    }

    /// Bearer token for the metadata request (raises the API rate limit).
    #[must_use]
    pub fn token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }
}

impl ReleaseSource for GithubSource {
    type Release = GithubRelease;

    fn describe(&self) -> String { format!("github:{}", self.repo) }

    fn latest_url(&self) -> String { format!("{}{}/releases/latest", self.api_base, self.repo) }

    fn headers(&self) -> Vec<Header> {
        let mut headers = vec![("Accept".to_string(), "application/vnd.github+json".to_string())];
        if let Some(token) = &self.token {
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }
        headers
    }

    fn latest_version(&self, release: &GithubRelease) -> Result<String> {
        // A release without a title falls back to its tag.
        [&release.name, &release.tag_name]
            .into_iter()
            .flatten()
            .find(|v| !v.is_empty())
            .cloned()
            .ok_or_else(|| Error::Parse {
                url:     self.latest_url(),
                message: "release has neither a name nor a tag".to_string(),
            })
    }

    fn select_download_url(&self, release: &GithubRelease, platform: &Platform) -> Result<String> {
        select_asset(&release.assets, &self.name, platform)
            .map(|asset| asset.browser_download_url.clone())
            .ok_or_else(|| Error::NoInstallationCandidate {
                platform: platform.to_string(),
            })
    }
}

/// Pick the asset for `package` on `platform`.
///
/// The part of the filename before the first dot must contain the package
/// name, OS and arch as substrings. Only extensionless binaries and
/// `.tar.*` archives qualify. Ties go to the smallest download URL.
pub fn select_asset<'a>(assets: &'a [GithubAsset], package: &str, platform: &Platform) -> Option<&'a GithubAsset> {
    assets
        .iter()
        .filter(|asset| qualifies(&asset.name, package, platform))
        .min_by(|a, b| a.browser_download_url.cmp(&b.browser_download_url))
}

fn qualifies(filename: &str, package: &str, platform: &Platform) -> bool {
    let segments: Vec<&str> = filename.split('.').collect();
    let stem = segments[0];
    if ![package, platform.os(), platform.arch()].iter().all(|part| stem.contains(part)) {
        return false;
    }

    match segments.as_slice() {
        [_] => true,
        [.., second_last, _] => second_last.contains("tar"),
        [] => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(name: &str) -> GithubAsset {
        GithubAsset {
            name:                 name.to_string(),
            browser_download_url: format!("https://github.com/o/r/releases/download/v1/{name}"),
        }
    }

    fn linux_amd64() -> Platform { Platform::new("linux", "amd64") }

    #[test]
    fn tarball_selected_zip_excluded() {
        let assets = [
            asset("tool-linux-amd64.zip"),
            asset("tool-linux-amd64.tar.gz"),
            asset("tool-darwin-amd64.tar.gz"),
        ];
        let selected = select_asset(&assets, "tool", &linux_amd64()).unwrap();
        assert_eq!(selected.name, "tool-linux-amd64.tar.gz");
    }

    #[test]
    fn extensionless_binary_qualifies() {
        let assets = [asset("tool_linux_amd64_extra"), asset("tool-windows-amd64.exe")];
        let selected = select_asset(&assets, "tool", &linux_amd64()).unwrap();
        assert_eq!(selected.name, "tool_linux_amd64_extra");
    }

    #[test]
    fn substrings_are_order_independent() {
        let assets = [asset("linux-amd64-tool")];
        assert!(select_asset(&assets, "tool", &linux_amd64()).is_some());
    }

    #[test]
    fn only_first_segment_is_searched() {
        // os and arch live after the first dot, so the stem lacks them
        let assets = [asset("tool.linux.amd64.tar.gz")];
        assert!(select_asset(&assets, "tool", &linux_amd64()).is_none());
    }

    #[test]
    fn tie_breaks_on_smallest_url() {
        let assets = [
            GithubAsset {
                name:                 "tool-linux-amd64.tar.gz".to_string(),
                browser_download_url: "https://mirror-b/tool-linux-amd64.tar.gz".to_string(),
            },
            GithubAsset {
                name:                 "tool-linux-amd64-musl.tar.xz".to_string(),
                browser_download_url: "https://mirror-a/tool-linux-amd64-musl.tar.xz".to_string(),
            },
        ];
        let selected = select_asset(&assets, "tool", &linux_amd64()).unwrap();
        assert_eq!(selected.browser_download_url, "https://mirror-a/tool-linux-amd64-musl.tar.xz");
    }

    #[test]
    fn checksum_files_are_ignored() {
        let assets = [asset("tool-linux-amd64.tar.gz.sha256"), asset("tool-linux-amd64.sbom.json")];
        assert!(select_asset(&assets, "tool", &linux_amd64()).is_none());
    }

    #[test]
    fn arm64_host_matches_arm64_assets() {
        let assets = [asset("tool-linux-amd64.tar.gz"), asset("tool-linux-arm64.tar.gz")];
        let selected = select_asset(&assets, "tool", &Platform::new("Linux", "aarch64")).unwrap();
        assert_eq!(selected.name, "tool-linux-arm64.tar.gz");
    }

    #[test]
    fn no_candidate_is_an_error() {
        let source = GithubSource::new("tool", "o/r");
        let release = GithubRelease {
            name:     Some("v1.0.0".to_string()),
            tag_name: None,
            assets:   vec![asset("tool-darwin-arm64.tar.gz")],
        };
        let result = source.select_download_url(&release, &linux_amd64());
        assert!(matches!(result, Err(Error::NoInstallationCandidate { .. })));
    }

    #[test]
    fn latest_url_and_headers() {
        let source = GithubSource::new("rg", "BurntSushi/ripgrep").token(Some("secret".to_string()));
        assert_eq!(source.latest_url(), "https://api.github.com/repos/BurntSushi/ripgrep/releases/latest");
        assert!(
            source
                .headers()
                .contains(&("Authorization".to_string(), "Bearer secret".to_string()))
        );
    }

    #[test]
    fn empty_token_is_ignored() {
        let source = GithubSource::new("rg", "o/r").token(Some(String::new()));
        assert_eq!(source.headers().len(), 1);
    }

    #[test]
    fn api_base_gets_trailing_slash() {
        let source = GithubSource::new("rg", "o/r").api_base("http://localhost:8080/repos");
        assert_eq!(source.latest_url(), "http://localhost:8080/repos/o/r/releases/latest");
    }

    #[test]
    fn version_is_release_name() {
        let source = GithubSource::new("tool", "o/r");
        let release: GithubRelease =
            serde_json::from_str(r#"{"name": "1.4.0", "tag_name": "v1.4.0", "assets": []}"#).unwrap();
        assert_eq!(source.latest_version(&release).unwrap(), "1.4.0");
    }

    #[test]
    fn version_falls_back_to_tag() {
        let source = GithubSource::new("tool", "o/r");
        let release: GithubRelease = serde_json::from_str(r#"{"name": null, "tag_name": "v2.0.0"}"#).unwrap();
        assert_eq!(source.latest_version(&release).unwrap(), "v2.0.0");
    }

    #[test]
    fn version_missing_is_parse_error() {
        let source = GithubSource::new("tool", "o/r");
        let release: GithubRelease = serde_json::from_str(r#"{"name": ""}"#).unwrap();
        assert!(matches!(source.latest_version(&release), Err(Error::Parse { .. })));
    }
}
