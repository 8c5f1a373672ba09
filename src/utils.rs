//! Utility functions for path handling.

use std::{env, path::PathBuf};

/// Name of the fallback configuration file, looked up in the home directory.
pub const FALLBACK_CONFIG_NAME: &str = ".genderbot.yaml";

/// Joins a directory path with a file or subdirectory name.
///
/// # Examples
///
/// ```ignore
/// let path = get_path("/home/user", ".genderbot.yaml");
/// assert_eq!(path, "/home/user/.genderbot.yaml");
/// ```
pub fn get_path(dir_path: &str, subdir_path: &str) -> String {
    let path_buf: PathBuf = [dir_path, subdir_path].iter().collect();
    path_buf.to_string_lossy().into_owned()
}

/// Path of the fallback configuration file: `~/.genderbot.yaml`.
///
/// Falls back to the current directory when `HOME` is not set.
pub fn default_fallback_path() -> String {
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_owned());
    get_path(&home, FALLBACK_CONFIG_NAME)
}
