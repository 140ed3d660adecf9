/// Extension check for files picked in the open dialog
use std::path::Path;

/// Extensions the converter accepts (case-sensitive)
pub const VALID_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Check if the file name has a valid extension.
///
/// The extension is whatever follows the last `.`; a name without any `.`
/// is treated as its own extension. Missing and empty names are rejected.
pub fn check_extension(name: Option<&str>) -> bool {
    let Some(name) = name else {
        return false;
    };
    if name.is_empty() {
        return false;
    }

    let extension = name.rsplit('.').next().unwrap_or(name);
    VALID_EXTENSIONS.contains(&extension)
}

/// Same rule applied to a full path
///
/// Non-UTF-8 bytes elsewhere in the path are replaced, which never touches
/// an ASCII extension.
pub fn check_path_extension(path: &Path) -> bool {
    check_extension(Some(&path.to_string_lossy()))
}
