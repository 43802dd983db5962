//! The `gattlib-py` package's metadata, as handed to the Python packaging toolchain.

use crate::errors::AppError;
use crate::version::VersionString;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

mod find_packages;
mod pkg_info;

pub use self::find_packages::find_packages;

pub const PACKAGE_NAME: &str = "gattlib-py";
pub const AUTHOR: &str = "Olivier Martin";
pub const AUTHOR_EMAIL: &str = "olivier@labapart.com";
pub const DESCRIPTION: &str = "Python wrapper for gattlib library";
pub const URL: &str = "https://github.com/labapart/gattlib/gattlib-py";

/// The file (relative to the project directory) that provides the long description.
pub const README_FILE: &str = "README.md";
pub const README_CONTENT_TYPE: &str = "text/markdown";

/// The package's runtime requirements.
pub const INSTALL_REQUIRES: [&str; 1] = ["setuptools"];

/// Everything the packaging toolchain is told about the package.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct PackageDescriptor {
    pub name: String,
    pub version: VersionString,
    pub author: String,
    pub author_email: String,
    pub description: String,

    /// The verbatim content of the project's `README.md`.
    pub long_description: String,
    pub long_description_content_type: String,
    pub url: String,

    /// The dotted names of the Python packages to include, as found by [find_packages].
    pub packages: Vec<String>,
    pub install_requires: Vec<String>,
}

impl PackageDescriptor {
    /// Assembles the [PackageDescriptor] for the project in `project_dir`.
    ///
    /// Parameters:
    /// * `project_dir`: the directory containing `README.md` and the Python packages
    /// * `version`: the already-resolved [VersionString]
    ///
    /// Returns [AppError::MissingReadme] if the long description can't be read.
    #[tracing::instrument(level = "debug", skip(version), fields(version = %version))]
    pub fn load(project_dir: &Path, version: VersionString) -> Result<PackageDescriptor, AppError> {
        let readme = project_dir.join(README_FILE);
        let long_description =
            fs::read_to_string(&readme).map_err(|source| AppError::MissingReadme {
                path: readme.clone(),
                source,
            })?;

        let packages = find_packages(project_dir);
        debug!(packages = ?packages, "discovered Python packages");

        Ok(PackageDescriptor {
            name: PACKAGE_NAME.to_owned(),
            version,
            author: AUTHOR.to_owned(),
            author_email: AUTHOR_EMAIL.to_owned(),
            description: DESCRIPTION.to_owned(),
            long_description,
            long_description_content_type: README_CONTENT_TYPE.to_owned(),
            url: URL.to_owned(),
            packages,
            install_requires: INSTALL_REQUIRES.iter().map(|r| (*r).to_owned()).collect(),
        })
    }
}
