//! Resolves the version of the `gattlib-py` Python package from the enclosing Git checkout (or from the
//! `GATTLIB_PY_VERSION` override), and assembles the package metadata that the Python packaging
//! toolchain is given.
//!
//! The binary is a thin wrapper around [run_packaging]; the [version] and [package] modules can be
//! used directly by other tooling.

pub mod cli;
pub mod config;
pub mod errors;
pub mod package;
pub mod tool_metadata;
pub mod version;

use crate::cli::{Cli, CliCommand};
use crate::config::{AppConfig, ConfigProvider, ProcessEnvironment};
use crate::package::PackageDescriptor;
use crate::tool_metadata::ToolMetadata;
use crate::version::{
    DescribeParts, GitDescriber, Resolution, VersionResolver, VersionSource, VersionString,
};
use chrono::prelude::*;
use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Represents the application's context/state.
pub struct AppState<'a> {
    pub config: AppConfig,
    pub provider: &'a dyn ConfigProvider,
}

impl<'a> AppState<'a> {
    /// Constructs the [AppState] for the specified command line arguments.
    ///
    /// Parameters:
    /// * `provider`: the [ConfigProvider] to read the configuration (and version override) from
    /// * `cli`: the parsed command line, whose options take precedence over `provider`
    pub fn new(provider: &'a dyn ConfigProvider, cli: &Cli) -> Result<AppState<'a>> {
        let mut config = AppConfig::new(provider).context("Error when reading configuration.")?;
        if let Some(project_dir) = &cli.project_dir {
            config.project_dir = project_dir.clone();
        }

        Ok(AppState { config, provider })
    }

    /// Returns the [GitDescriber] for the configured project.
    fn describer(&self) -> GitDescriber {
        GitDescriber::new(self.config.git_program.clone(), &self.config.project_dir)
    }
}

/// The JSON document printed by the `descriptor` command.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DescriptorReport {
    /// When the report was generated, in wall clock time.
    pub generated: DateTime<Utc>,

    /// Details on the build of the tool that generated the report.
    pub tool: ToolMetadata,

    /// The project directory that was described.
    pub project_dir: PathBuf,

    /// Where the package version came from.
    pub version_source: VersionSource,

    /// The package version's components, or `None` if the version is empty.
    pub version_parts: Option<DescribeParts>,

    /// The package descriptor itself.
    pub package: PackageDescriptor,
}

/// The library crate's primary entry point: parses the command line, then prints whatever it asked for.
pub fn run_packaging() -> Result<()> {
    // Initialize tracing & logging. Because the "tracing-log" feature from "tracing-subscriber" is active,
    // this will also route all log crate usage (from our dependencies) to tracing, instead. Standard output
    // is reserved for the command's result.
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .with_target(false);
    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(tracing_error::ErrorLayer::default())
        .init();

    let cli: Cli = clap::Parser::parse();
    let provider = ProcessEnvironment::load();
    let app_state = AppState::new(&provider, &cli)?;

    let command = cli.command.unwrap_or(CliCommand::Version);
    let output = render_command(&app_state, command, cli.strict)?;
    print!("{}", output);

    Ok(())
}

/// Runs the specified [CliCommand], returning the text it should print. Every command assembles the
/// full [PackageDescriptor] first, so a missing `README.md` is fatal even when only the version is
/// printed.
///
/// Parameters:
/// * `app_state`: the application's [AppState]
/// * `command`: the [CliCommand] to run
/// * `strict`: whether a failure to query source control should be an error
#[tracing::instrument(level = "debug", skip(app_state))]
pub fn render_command(app_state: &AppState, command: CliCommand, strict: bool) -> Result<String> {
    let resolution = resolve_version(app_state, strict)?;
    info!(version = %resolution.version, source = ?resolution.source, "resolved package version");

    let package = load_descriptor(app_state, resolution.version)?;

    match command {
        CliCommand::Version => Ok(format!("{}\n", package.version)),
        CliCommand::Descriptor => {
            let report = DescriptorReport {
                generated: Utc::now(),
                tool: ToolMetadata::default(),
                project_dir: app_state.config.project_dir.clone(),
                version_source: resolution.source,
                version_parts: package.version.parts(),
                package,
            };
            let report = serde_json::to_string_pretty(&report)
                .context("Error when serializing the package descriptor.")?;
            Ok(format!("{}\n", report))
        }
        CliCommand::PkgInfo => Ok(package.to_pkg_info()),
    }
}

/// Resolves the package version, either leniently or strictly.
fn resolve_version(app_state: &AppState, strict: bool) -> Result<Resolution> {
    let describer = app_state.describer();
    let resolution = VersionResolver::new(app_state.provider, &describer).resolve_detailed();
    if !strict {
        return Ok(resolution);
    }

    let resolution = resolution.into_strict().with_context(|| {
        format!(
            "Unable to resolve a version for '{}'.",
            app_state.config.project_dir.display()
        )
    })?;
    Ok(resolution)
}

/// Loads the [PackageDescriptor] for the configured project.
fn load_descriptor(app_state: &AppState, version: VersionString) -> Result<PackageDescriptor> {
    PackageDescriptor::load(&app_state.config.project_dir, version).with_context(|| {
        format!(
            "Error when assembling the package descriptor for '{}'.",
            app_state.config.project_dir.display()
        )
    })
}
