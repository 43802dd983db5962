//! Application configuration.

use crate::errors::AppError;
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

/// The configuration key for the project directory: the directory containing `README.md`, the
/// Python packages, and (somewhere at or above it) the Git checkout.
pub const KEY_PROJECT_DIR: &str = "GATTLIB_PY_PROJECT_DIR";

/// The configuration key for the source control program to run.
pub const KEY_GIT_PROGRAM: &str = "GATTLIB_PY_GIT";

/// A source of configuration values, keyed by name.
///
/// The application reads the process environment through [ProcessEnvironment]; tests substitute a
/// `HashMap` so that they never have to mutate the real environment.
pub trait ConfigProvider {
    /// Returns the value for `key`, or `None` if it isn't set (or isn't valid Unicode).
    fn lookup(&self, key: &str) -> Option<String>;
}

/// The [ConfigProvider] backed by the process' environment variables.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessEnvironment;

impl ProcessEnvironment {
    /// Returns a [ProcessEnvironment], after loading any `.env` file in the working directory into the
    /// process environment. Variables that are already set are not overwritten.
    pub fn load() -> ProcessEnvironment {
        dotenv::dotenv().ok();
        ProcessEnvironment
    }
}

impl ConfigProvider for ProcessEnvironment {
    fn lookup(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

impl ConfigProvider for HashMap<&str, &str> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).map(|value| value.to_string())
    }
}

/// Represents the application's configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub project_dir: PathBuf,
    pub git_program: String,
}

impl AppConfig {
    /// Parses the configurable entries from the specified [ConfigProvider], applying defaults for
    /// anything that's unset.
    pub fn new(provider: &dyn ConfigProvider) -> Result<AppConfig, AppError> {
        let project_dir = provider
            .lookup(KEY_PROJECT_DIR)
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let git_program = provider
            .lookup(KEY_GIT_PROGRAM)
            .unwrap_or_else(|| String::from("git"));
        if git_program.trim().is_empty() {
            return Err(AppError::ConfigInvalid {
                key: KEY_GIT_PROGRAM,
                reason: "must name a program".to_owned(),
            });
        }

        Ok(AppConfig {
            project_dir,
            git_program,
        })
    }
}
