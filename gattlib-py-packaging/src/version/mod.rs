//! Derives the package version from the override in the environment or, failing that, from the state
//! of the enclosing Git checkout.

use crate::config::ConfigProvider;
use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

mod describe;
mod parts;

pub use self::describe::{DescribeOutput, GitDescriber, RepositoryDescriber, DESCRIBE_ARGS};
pub use self::parts::{DescribeParts, DIRTY_SUFFIX};

/// The configuration key whose (non-empty) value replaces the derived version.
pub const VERSION_OVERRIDE_KEY: &str = "GATTLIB_PY_VERSION";

/// A resolved package version, e.g. `0.7.2`, `0.7.2-3-g0123abc-dirty`, or `0123abc`.
///
/// May be empty, if resolution degraded. See [VersionResolver::resolve].
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct VersionString(String);

impl VersionString {
    /// Returns the version as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if resolution produced nothing at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the [DescribeParts] of this version, or `None` if it's empty.
    pub fn parts(&self) -> Option<DescribeParts> {
        DescribeParts::parse(&self.0)
    }
}

impl std::fmt::Display for VersionString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for VersionString {
    fn from(version: &str) -> Self {
        VersionString(version.to_owned())
    }
}

impl From<String> for VersionString {
    fn from(version: String) -> Self {
        VersionString(version)
    }
}

/// Enumerates where a [VersionString] came from.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionSource {
    /// The value of [VERSION_OVERRIDE_KEY] was used verbatim.
    Override,

    /// The source control query succeeded.
    SourceControl,

    /// The source control query failed, and whatever it wrote to standard output (usually nothing) was
    /// used anyway. Includes the query's diagnostics.
    Degraded(String),
}

/// A [VersionString] along with its [VersionSource].
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Resolution {
    pub version: VersionString,
    pub source: VersionSource,
}

impl Resolution {
    /// Returns this [Resolution], or an error if the source control query failed or nothing at all
    /// was resolved.
    pub fn into_strict(self) -> Result<Resolution, AppError> {
        if let VersionSource::Degraded(diagnostics) = self.source {
            return Err(AppError::SourceControlUnavailable(diagnostics));
        }
        if self.version.is_empty() {
            return Err(AppError::EmptyVersion);
        }

        Ok(self)
    }
}

/// Resolves the package version. Each call consults the configuration and (unless overridden) runs
/// the source control query again: nothing is cached.
pub struct VersionResolver<'a> {
    config: &'a dyn ConfigProvider,
    describer: &'a dyn RepositoryDescriber,
}

impl<'a> VersionResolver<'a> {
    /// Constructs a new [VersionResolver].
    ///
    /// Parameters:
    /// * `config`: the [ConfigProvider] to read [VERSION_OVERRIDE_KEY] from
    /// * `describer`: the [RepositoryDescriber] to query when there's no override
    pub fn new(
        config: &'a dyn ConfigProvider,
        describer: &'a dyn RepositoryDescriber,
    ) -> VersionResolver<'a> {
        VersionResolver { config, describer }
    }

    /// Returns the package version, exactly as the packaging toolchain should see it.
    ///
    /// Failure to query source control is not an error: the result is then whatever output the query
    /// captured, which is usually the empty string. Use [VersionResolver::resolve_strict] to treat
    /// that as an error instead.
    pub fn resolve(&self) -> VersionString {
        self.resolve_detailed().version
    }

    /// Returns the package version along with where it came from.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn resolve_detailed(&self) -> Resolution {
        if let Some(version) = self
            .config
            .lookup(VERSION_OVERRIDE_KEY)
            .filter(|version| !version.is_empty())
        {
            info!(version = %version, "using version override from '{}'", VERSION_OVERRIDE_KEY);
            return Resolution {
                version: VersionString(version),
                source: VersionSource::Override,
            };
        }

        let output = self.describer.describe_repository();
        let version = VersionString(output.output.trim().to_owned());
        if output.succeeded {
            debug!(version = %version, "resolved version from source control");
            Resolution {
                version,
                source: VersionSource::SourceControl,
            }
        } else {
            warn!(
                version = %version,
                diagnostics = %output.diagnostics.trim(),
                "source control query failed; using its partial output as the version"
            );
            Resolution {
                version,
                source: VersionSource::Degraded(output.diagnostics.trim().to_owned()),
            }
        }
    }

    /// Returns the package version, or an error if the source control query failed or nothing at all
    /// was resolved.
    pub fn resolve_strict(&self) -> Result<VersionString, AppError> {
        self.resolve_detailed()
            .into_strict()
            .map(|resolution| resolution.version)
    }
}
