use std::process::ExitCode;

use anyhow::{Context, Result};
use binstate::{InstallOutcome, PackageSpec, Reconciler, ReleaseSource, Settings};
use binstate_fetch::ReqwestClient;
use clap::Parser;

use crate::cli::{App, Commands};

mod cli;
mod logging;

const EXIT_OK: u8 = 0;
const EXIT_FAILED: u8 = 1;
const EXIT_SETUP: u8 = 2;

fn main() -> ExitCode {
    let app = App::parse();
    logging::init(app.verbose);

    let (document, code) = report(run(&app));
    if let Some(document) = document {
        println!("{document}");
    }
    ExitCode::from(code)
}

fn run(app: &App) -> Result<InstallOutcome> {
    let settings = Settings::load(app.config.as_deref(), &app.overrides()).context("failed to load settings")?;
    let client = ReqwestClient::new(&settings.client_options()).context("failed to build HTTP client")?;

    let outcome = match &app.cmd {
        Commands::Github(arg) => {
            let spec = arg.target.spec(&arg.name, &arg.version_flag)?;
            let source = settings.github_source(&arg.name, &arg.repo);
            reconcile(spec, source, client, &settings, arg.target.state)
        }
        Commands::Hashicorp(arg) => {
            let spec = arg.target.spec(&arg.name, &arg.version_flag)?;
            let source = settings.hashicorp_source(&arg.name);
            reconcile(spec, source, client, &settings, arg.target.state)
        }
    };
    Ok(outcome)
}

fn reconcile<S: ReleaseSource>(
    spec: PackageSpec,
    source: S,
    client: ReqwestClient,
    settings: &Settings,
    state: binstate::DesiredState,
) -> InstallOutcome {
    Reconciler::new(spec, source, client)
        .with_platform(settings.platform())
        .run(state)
}

/// The stdout document and exit status of a finished invocation.
///
/// A run that reached the reconciler always prints its outcome; setup
/// failures print nothing and exit with [`EXIT_SETUP`].
fn report(result: Result<InstallOutcome>) -> (Option<String>, u8) {
    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "aborted before reconciling");
            eprintln!("binstate: {e:#}");
            return (None, EXIT_SETUP);
        }
    };

    match outcome.to_json() {
        Ok(document) => (Some(document), if outcome.failed { EXIT_FAILED } else { EXIT_OK }),
        Err(e) => {
            eprintln!("binstate: failed to encode outcome: {e}");
            (None, EXIT_SETUP)
        }
    }
}
