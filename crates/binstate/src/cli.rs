use std::path::PathBuf;

use binstate::config::Overrides;
use binstate::{DesiredState, PackageSpec};
use clap::{ArgAction, Args, Parser, Subcommand};

const DEFAULT_INSTALL_DIR: &str = "/usr/local/bin";

#[derive(Clone, Debug, Parser)]
#[command(name = "binstate", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
pub struct App {
    #[command(subcommand)]
    pub cmd: Commands,

    #[arg(long, global = true, env = "BINSTATE_CONFIG", help = "TOML settings file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, value_name = "SECS", help = "Connect timeout for HTTP requests")]
    pub connect_timeout: Option<u64>,

    #[arg(long, global = true, value_name = "SECS", help = "Total timeout for each HTTP request")]
    pub timeout: Option<u64>,

    #[arg(short, long, global = true, action = ArgAction::Count, help = "Log more (-v info, -vv debug)")]
    pub verbose: u8,
}

impl App {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            connect_timeout_secs: self.connect_timeout,
            timeout_secs:         self.timeout,
        }
    }
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    #[command(alias = "gh", name = "github", about = "Binary published as a GitHub release asset")]
    Github(GithubArg),
    #[command(alias = "hc", name = "hashicorp", about = "Binary from the HashiCorp release catalog")]
    Hashicorp(HashicorpArg),
}

#[derive(Args, Clone, Debug)]
pub struct GithubArg {
    #[arg(long, help = "Binary name, matched against asset names")]
    pub name: String,

    #[arg(long, value_name = "OWNER/REPO")]
    pub repo: String,

    #[arg(long, default_value = "--version", allow_hyphen_values = true)]
    pub version_flag: String,

    #[command(flatten)]
    pub target: Target,
}

#[derive(Args, Clone, Debug)]
pub struct HashicorpArg {
    #[arg(long, help = "Product name in the release catalog")]
    pub name: String,

    #[arg(long, default_value = "-version", allow_hyphen_values = true)]
    pub version_flag: String,

    #[command(flatten)]
    pub target: Target,
}

#[derive(Args, Clone, Debug)]
pub struct Target {
    #[arg(long, default_value = DEFAULT_INSTALL_DIR, help = "Directory holding the binary")]
    pub path: PathBuf,

    #[arg(long, value_enum, default_value_t = DesiredState::Present)]
    pub state: DesiredState,
}

impl Target {
    pub fn spec(&self, name: &str, version_flag: &str) -> binstate::Result<PackageSpec> {
        PackageSpec::new(name, self.path.clone(), version_flag)
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_is_well_formed() { App::command().debug_assert(); }

    #[test]
    fn github_defaults() {
        let app = App::try_parse_from(["binstate", "github", "--name", "tool", "--repo", "acme/tool"]).unwrap();
        let Commands::Github(arg) = app.cmd else {
            panic!("expected github subcommand");
        };
        assert_eq!(arg.version_flag, "--version");
        assert_eq!(arg.target.path, PathBuf::from(DEFAULT_INSTALL_DIR));
        assert_eq!(arg.target.state, DesiredState::Present);
    }

    #[test]
    fn hashicorp_flags() {
        let app = App::try_parse_from([
            "binstate",
            "--timeout",
            "30",
            "hashicorp",
            "--name",
            "terraform",
            "--state",
            "latest",
            "--path",
            "/opt/bin",
        ])
        .unwrap();
        assert_eq!(app.overrides().timeout_secs, Some(30));
        let Commands::Hashicorp(arg) = app.cmd else {
            panic!("expected hashicorp subcommand");
        };
        assert_eq!(arg.version_flag, "-version");
        assert_eq!(arg.target.state, DesiredState::Latest);
        assert_eq!(arg.target.path, PathBuf::from("/opt/bin"));
    }

    #[test]
    fn version_flag_may_start_with_hyphen() {
        let app =
            App::try_parse_from(["binstate", "github", "--name", "t", "--repo", "a/t", "--version-flag", "-V"]).unwrap();
        let Commands::Github(arg) = app.cmd else {
            panic!("expected github subcommand");
        };
        assert_eq!(arg.version_flag, "-V");
    }

    #[test]
    fn unknown_state_is_rejected() {
        let result = App::try_parse_from(["binstate", "hashicorp", "--name", "vault", "--state", "installed"]);
        assert!(result.is_err());
    }
}
