//! Layered runtime settings.
//!
//! Sources, lowest precedence first: built-in defaults, a TOML file,
//! `$GITHUB_TOKEN`, `BINSTATE_*` environment variables, command line flags.
//!
//! ```toml
//! connect_timeout_secs = 10
//! timeout_secs = 300
//! github_api = "https://github.example.com/api/v3/repos/"
//! arch = "amd64"
//! ```

use std::path::Path;
use std::time::Duration;

use binstate_fetch::ClientOptions;
use binstate_platform::Platform;
use binstate_source::{GithubSource, HashicorpSource, github, hashicorp};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const ENV_PREFIX: &str = "BINSTATE_";

/// Network and platform settings shared by every run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_timeout_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs:         Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent:           Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_token:         Option<String>,
    pub github_api:           String,
    pub hashicorp_api:        String,
    /// Overrides the detected host OS for asset selection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os:                   Option<String>,
    /// Overrides the detected host architecture for asset selection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arch:                 Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            connect_timeout_secs: None,
            timeout_secs:         None,
            user_agent:           None,
            github_token:         None,
            github_api:           github::DEFAULT_API.to_string(),
            hashicorp_api:        hashicorp::DEFAULT_API.to_string(),
            os:                   None,
            arch:                 None,
        }
    }
}

/// Values taken from command line flags; unset fields leave lower layers alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connect_timeout_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs:         Option<u64>,
}

impl Settings {
    /// Merge all layers. An explicitly named config file must exist.
    pub fn load(config: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        if let Some(path) = config
            && !path.is_file()
        {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }

        let settings = Self::figment(config).merge(Serialized::defaults(overrides)).extract()?;
        tracing::debug!(?settings, "settings loaded");
        Ok(settings)
    }

    /// Defaults, file and environment layers, without command line flags.
    pub fn figment(config: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = config {
            figment = figment.merge(Toml::file(path));
        }
        figment
            .merge(Env::raw().only(&["GITHUB_TOKEN"]))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["LOG", "CONFIG"]))
    }

    pub fn client_options(&self) -> ClientOptions {
        let options = ClientOptions::default()
            .connect_timeout(self.connect_timeout_secs.map(Duration::from_secs))
            .request_timeout(self.timeout_secs.map(Duration::from_secs));
        match &self.user_agent {
            Some(agent) => options.user_agent(agent.as_str()),
            None => options,
        }
    }

    /// Host platform with the configured overrides applied.
    pub fn platform(&self) -> Platform {
        let host = Platform::host();
        Platform::new(
            self.os.as_deref().unwrap_or(host.os()),
            self.arch.as_deref().unwrap_or(host.arch()),
        )
    }

    pub fn github_source(&self, name: &str, repo: &str) -> GithubSource {
        GithubSource::new(name, repo)
            .api_base(self.github_api.as_str())
            .token(self.github_token.clone())
    }

    pub fn hashicorp_source(&self, product: &str) -> HashicorpSource {
        HashicorpSource::new(product).api_base(self.hashicorp_api.as_str())
    }
}

#[cfg(test)]
mod tests {
    use binstate_source::ReleaseSource;
    use figment::Jail;

    use super::*;

    fn load(config: Option<&Path>, overrides: &Overrides) -> figment::error::Result<Settings> {
        Settings::load(config, overrides).map_err(|e| e.to_string().into())
    }

    #[test]
    fn defaults_point_at_public_apis() {
        Jail::expect_with(|_| {
            let settings = load(None, &Overrides::default())?;
            assert_eq!(settings.github_api, github::DEFAULT_API);
            assert_eq!(settings.hashicorp_api, hashicorp::DEFAULT_API);
            assert_eq!(settings.timeout_secs, None);
            Ok(())
        });
    }

    #[test]
    fn layers_apply_in_order() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "binstate.toml",
                r#"
                connect_timeout_secs = 5
                timeout_secs = 60
                user_agent = "from-file"
                "#,
            )?;
            jail.set_env("BINSTATE_TIMEOUT_SECS", "120");
            let overrides = Overrides {
                connect_timeout_secs: Some(1),
                timeout_secs:         None,
            };

            let settings = load(Some(Path::new("binstate.toml")), &overrides)?;
            assert_eq!(settings.connect_timeout_secs, Some(1));
            assert_eq!(settings.timeout_secs, Some(120));
            assert_eq!(settings.user_agent.as_deref(), Some("from-file"));
            Ok(())
        });
    }

    #[test]
    fn github_token_falls_back_to_standard_variable() {
        Jail::expect_with(|jail| {
            jail.set_env("GITHUB_TOKEN", "plain");
            assert_eq!(load(None, &Overrides::default())?.github_token.as_deref(), Some("plain"));

            jail.set_env("BINSTATE_GITHUB_TOKEN", "scoped");
            assert_eq!(load(None, &Overrides::default())?.github_token.as_deref(), Some("scoped"));
            Ok(())
        });
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let err = Settings::load(Some(Path::new("/nonexistent/binstate.toml")), &Overrides::default()).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound(_)));
    }

    #[test]
    fn platform_overrides_are_normalized() {
        let settings = Settings {
            os: Some("Linux".into()),
            arch: Some("aarch64".into()),
            ..Settings::default()
        };
        assert_eq!(settings.platform(), Platform::new("linux", "arm64"));
    }

    #[test]
    fn client_options_carry_timeouts() {
        let settings = Settings {
            connect_timeout_secs: Some(3),
            user_agent: Some("ci".into()),
            ..Settings::default()
        };
        let options = settings.client_options();
        assert_eq!(options.timeouts.connect, Some(Duration::from_secs(3)));
        assert_eq!(options.timeouts.request, None);
        assert_eq!(options.user_agent, "ci");
    }

    #[test]
    fn sources_use_configured_endpoints() {
        let settings = Settings {
            github_api: "https://mirror/repos".into(),
            hashicorp_api: "https://mirror/releases/".into(),
            ..Settings::default()
        };
        assert_eq!(
            settings.github_source("tool", "acme/tool").latest_url(),
            "https://mirror/repos/acme/tool/releases/latest"
        );
        assert_eq!(
            settings.hashicorp_source("vault").latest_url(),
            "https://mirror/releases/vault/latest"
        );
    }
}
