//! Value checks shared by the config sections

use crate::error::ValidationError;
use std::path::Path;

/// A `[table]` of config.toml that can vet its own values
pub trait ConfigSection {
    /// Table name, used as the prefix of every reported field
    const NAME: &'static str;

    /// Appends one entry to `problems` for each bad value
    fn check(&self, problems: &mut Vec<ValidationError>);
}

/// Checks that `path` names a file rather than nothing or a bare root
pub(crate) fn check_file_path(
    section: &str,
    key: &str,
    path: &Path,
    problems: &mut Vec<ValidationError>,
) {
    if path.as_os_str().to_string_lossy().trim().is_empty() {
        problems.push(ValidationError::new(section, key, "must not be empty"));
    } else if path.file_name().is_none() {
        problems.push(ValidationError::new(
            section,
            key,
            format!("'{}' does not name a file", path.display()),
        ));
    }
}
