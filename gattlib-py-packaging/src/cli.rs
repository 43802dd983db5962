//! Command line arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Resolves the gattlib-py package version from Git and prints the package's metadata.
///
/// The version is taken verbatim from `GATTLIB_PY_VERSION` when that's set, and otherwise from
/// `git describe --abbrev=7 --dirty --always --tags`.
#[derive(Debug, Parser)]
#[command(name = "gattlib-py-packaging", version)]
pub struct Cli {
    /// The gattlib-py project directory. Overrides `GATTLIB_PY_PROJECT_DIR`.
    #[arg(long, value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// Fail, rather than fall back to an empty version, when Git can't be queried.
    #[arg(long)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

/// Enumerates the things that can be printed.
#[derive(Clone, Copy, Debug, PartialEq, Subcommand)]
pub enum CliCommand {
    /// Print the resolved version (the default).
    Version,

    /// Print the full package descriptor, as JSON.
    Descriptor,

    /// Print the package descriptor as a `PKG-INFO` file.
    PkgInfo,
}
