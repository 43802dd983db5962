//! Renders a [PackageDescriptor] as Python core metadata (the `PKG-INFO` file format).

use super::PackageDescriptor;

/// The core metadata version written. 2.1 is the first version with `Description-Content-Type` and
/// with the description allowed in the message body.
pub const METADATA_VERSION: &str = "2.1";

impl PackageDescriptor {
    /// Returns the `PKG-INFO` rendering of this descriptor: one header per field, then a blank line,
    /// then the long description as the body.
    ///
    /// Header values are written on one line each; any line breaks inside them are replaced by spaces.
    pub fn to_pkg_info(&self) -> String {
        let mut text = String::new();
        let mut header = |name: &str, value: &str| {
            let value = value.replace(|c: char| c == '\r' || c == '\n', " ");
            text.push_str(&format!("{}: {}\n", name, value));
        };

        header("Metadata-Version", METADATA_VERSION);
        header("Name", &self.name);
        header("Version", self.version.as_str());
        header("Summary", &self.description);
        header("Home-page", &self.url);
        header("Author", &self.author);
        header("Author-email", &self.author_email);
        header(
            "Description-Content-Type",
            &self.long_description_content_type,
        );
        for requirement in &self.install_requires {
            header("Requires-Dist", requirement);
        }

        text.push('\n');
        text.push_str(&self.long_description);
        text
    }
}
