//! Reads a `git describe` style version string back into its components.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// The suffix `git describe --dirty` appends when the working tree has uncommitted changes.
pub const DIRTY_SUFFIX: &str = "-dirty";

/// The components of a `<tag>[-<N>-g<hash>][-dirty]` (or `<hash>[-dirty]`) version string.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct DescribeParts {
    /// The nearest reachable tag, if any.
    pub tag: Option<String>,

    /// The number of commits since `tag`. `Some(0)` for a checkout at the tag itself, `None` when
    /// there is no tag.
    pub distance: Option<u32>,

    /// The abbreviated commit hash, which `git describe` omits for a checkout at the tag itself.
    pub commit: Option<String>,

    /// Whether the working tree had uncommitted changes.
    pub dirty: bool,
}

impl DescribeParts {
    /// Parses the specified version string. This never fails: text that doesn't follow the
    /// `git describe` conventions (e.g. an override like `1.2.3rc1`) is read as a bare tag.
    ///
    /// A tag made up only of 7 or more lowercase hex digits can't be told apart from a bare commit hash,
    /// and is read as the latter.
    ///
    /// Returns `None` for the empty string.
    pub fn parse(version: &str) -> Option<DescribeParts> {
        lazy_static! {
            static ref REGEX_DISTANCE: Regex =
                Regex::new("^(?P<tag>.+)-(?P<distance>\\d+)-g(?P<commit>[0-9a-f]{7,})$").unwrap();
            static ref REGEX_COMMIT: Regex = Regex::new("^[0-9a-f]{7,}$").unwrap();
        }

        if version.is_empty() {
            return None;
        }

        let (name, dirty) = match version.strip_suffix(DIRTY_SUFFIX) {
            Some(name) if !name.is_empty() => (name, true),
            _ => (version, false),
        };

        if let Some(capture) = REGEX_DISTANCE.captures(name) {
            if let Ok(distance) = capture["distance"].parse::<u32>() {
                return Some(DescribeParts {
                    tag: Some(capture["tag"].to_owned()),
                    distance: Some(distance),
                    commit: Some(capture["commit"].to_owned()),
                    dirty,
                });
            }
        }

        if REGEX_COMMIT.is_match(name) {
            return Some(DescribeParts {
                tag: None,
                distance: None,
                commit: Some(name.to_owned()),
                dirty,
            });
        }

        Some(DescribeParts {
            tag: Some(name.to_owned()),
            distance: Some(0),
            commit: None,
            dirty,
        })
    }

    /// Returns `true` if the version names a tagged commit exactly, in a clean working tree.
    pub fn is_release(&self) -> bool {
        self.tag.is_some() && self.distance == Some(0) && !self.dirty
    }
}
