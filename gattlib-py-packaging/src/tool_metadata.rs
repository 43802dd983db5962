//! Details on this tool's own build, as captured by `build.rs`.

use serde::{Deserialize, Serialize};

/// The value recorded for any build detail that `build.rs` couldn't capture.
const UNKNOWN: &str = "UNKNOWN";

/// Stores details on the build of this tool, so that generated output can be traced back to it.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ToolMetadata {
    /// This tool's crate version.
    pub tool_version: String,

    /// Whether the tool was compiled in debug or release mode.
    pub cargo_profile: String,

    /// The Git version of this tool that was built.
    pub git_semver: String,

    /// The specific Git commit ID that was built.
    pub git_sha: String,

    /// When the tool was built.
    pub build_timestamp: String,
}

impl Default for ToolMetadata {
    /// Constructs a new [ToolMetadata] instance from the values captured at build time. Git details are
    /// missing when the tool was built outside of a Git checkout.
    fn default() -> Self {
        ToolMetadata {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            cargo_profile: option_env!("VERGEN_CARGO_PROFILE")
                .unwrap_or(UNKNOWN)
                .to_string(),
            git_semver: option_env!("VERGEN_GIT_SEMVER")
                .unwrap_or(UNKNOWN)
                .to_string(),
            git_sha: option_env!("VERGEN_GIT_SHA").unwrap_or(UNKNOWN).to_string(),
            build_timestamp: option_env!("VERGEN_BUILD_TIMESTAMP")
                .unwrap_or(UNKNOWN)
                .to_string(),
        }
    }
}
