//! Discovers the Python packages in a project tree, the way setuptools' `find_packages()` does.

use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// The file that marks a directory as a (regular) Python package.
const PACKAGE_MARKER: &str = "__init__.py";

/// Returns the dotted names of all Python packages under `root`, sorted.
///
/// A directory is a package if it contains an `__init__.py` file and its name has no `.` in it.
/// The search only descends into packages, so a package nested inside a plain directory isn't found,
/// and neither is `root` itself. Symlinked directories are followed.
pub fn find_packages(root: &Path) -> Vec<String> {
    let mut packages: Vec<String> = WalkDir::new(root)
        .min_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_entry(is_package)
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| package_name(root, &entry))
        .collect();
    packages.sort();
    packages
}

/// Returns `true` if the [DirEntry] is a directory that setuptools would treat as a package.
fn is_package(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && !entry.file_name().to_string_lossy().contains('.')
        && entry.path().join(PACKAGE_MARKER).is_file()
}

/// Returns the dotted package name for the [DirEntry], relative to `root`.
fn package_name(root: &Path, entry: &DirEntry) -> Option<String> {
    let relative = entry.path().strip_prefix(root).ok()?;
    let components: Vec<String> = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect();
    if components.is_empty() {
        None
    } else {
        Some(components.join("."))
    }
}
