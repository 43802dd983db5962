//! Runs the source control query that names the current checkout.

use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// The arguments passed to `git`: name the checkout after the nearest tag (lightweight tags
/// included), with at least 7 hex characters of abbreviated hash, a `-dirty` suffix for
/// uncommitted changes, and a bare abbreviated hash when no tag is reachable.
pub const DESCRIBE_ARGS: [&str; 5] = ["describe", "--abbrev=7", "--dirty", "--always", "--tags"];

/// The captured result of a source control query.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DescribeOutput {
    /// Everything the query wrote to standard output, untrimmed.
    pub output: String,

    /// Whether the query ran and exited successfully.
    pub succeeded: bool,

    /// Everything the query wrote to standard error, or the reason it couldn't be started. Only ever
    /// logged.
    pub diagnostics: String,
}

impl DescribeOutput {
    /// Constructs a [DescribeOutput] for a query that succeeded with the specified output.
    pub fn success<S: Into<String>>(output: S) -> DescribeOutput {
        DescribeOutput {
            output: output.into(),
            succeeded: true,
            diagnostics: String::new(),
        }
    }

    /// Constructs a [DescribeOutput] for a query that failed, having written `output` (which is
    /// often empty) before it did.
    pub fn failure<S: Into<String>, D: Into<String>>(output: S, diagnostics: D) -> DescribeOutput {
        DescribeOutput {
            output: output.into(),
            succeeded: false,
            diagnostics: diagnostics.into(),
        }
    }
}

/// [RepositoryDescriber] implementations name the current checkout of a repository, as
/// `git describe` would.
///
/// Implementations must not cache: every call re-runs the query.
pub trait RepositoryDescriber {
    /// Runs the query once, blocking until it completes.
    fn describe_repository(&self) -> DescribeOutput;
}

impl<F> RepositoryDescriber for F
where
    F: Fn() -> DescribeOutput,
{
    fn describe_repository(&self) -> DescribeOutput {
        self()
    }
}

/// The [RepositoryDescriber] that runs the `git` command line tool.
#[derive(Clone, Debug)]
pub struct GitDescriber {
    git_program: String,
    repo_dir: PathBuf,
}

impl GitDescriber {
    /// Constructs a new [GitDescriber].
    ///
    /// Parameters:
    /// * `git_program`: the `git` executable to run, either a path or a name to search `PATH` for
    /// * `repo_dir`: the working directory to run it in, which may be anywhere inside the checkout
    pub fn new<S: Into<String>, P: AsRef<Path>>(git_program: S, repo_dir: P) -> GitDescriber {
        GitDescriber {
            git_program: git_program.into(),
            repo_dir: repo_dir.as_ref().to_path_buf(),
        }
    }
}

impl RepositoryDescriber for GitDescriber {
    #[tracing::instrument(level = "debug", skip(self), fields(repo_dir = %self.repo_dir.display()))]
    fn describe_repository(&self) -> DescribeOutput {
        let output = Command::new(&self.git_program)
            .args(&DESCRIBE_ARGS)
            .current_dir(&self.repo_dir)
            .output();

        match output {
            Ok(output) => {
                let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
                let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
                debug!(
                    status = %output.status,
                    stdout = %stdout.trim(),
                    stderr = %stderr.trim(),
                    "query completed"
                );

                DescribeOutput {
                    output: stdout,
                    succeeded: output.status.success(),
                    diagnostics: stderr,
                }
            }
            Err(err) => {
                debug!(program = %self.git_program, error = %err, "query could not be started");
                DescribeOutput::failure(
                    String::new(),
                    format!("unable to run '{}': {}", self.git_program, err),
                )
            }
        }
    }
}
