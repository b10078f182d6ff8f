use lazy_static::lazy_static;
use regex::Regex;
use std::fs::{self, create_dir_all};
use std::path::{Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref UNSAFE_CHARS: Regex = Regex::new(r"[^A-Za-z0-9_.-]").unwrap();
}

const WINDOWS_DEVICE_NAMES: [&str; 22] = [
    "CON", "AUX", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8", "COM9", "LPT1",
    "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9", "PRN", "NUL",
];

/// Reduce a client-supplied file name to a safe single path component
///
/// Accented letters are folded to ASCII (NFKD, then non-ASCII dropped).
/// Path separators become spaces, whitespace runs become `_`, anything
/// outside `[A-Za-z0-9_.-]` is removed, and leading or trailing `.`/`_`
/// are stripped. The result can be empty.
///
/// # Examples
/// ```
/// use score_dashboard::saving::sanitize_filename;
///
/// assert_eq!(sanitize_filename("My Class Marks.csv"), "My_Class_Marks.csv");
/// assert_eq!(sanitize_filename("../../etc/passwd"), "etc_passwd");
/// ```
pub fn sanitize_filename(filename: &str) -> String {
    let ascii: String = filename.nfkd().filter(char::is_ascii).collect();
    let spaced = ascii.replace(['/', '\\'], " ");
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    let cleaned = UNSAFE_CHARS.replace_all(&joined, "");
    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_');

    let stem = trimmed.split('.').next().unwrap_or_default().to_uppercase();
    if WINDOWS_DEVICE_NAMES.contains(&stem.as_str()) {
        format!("_{}", trimmed)
    } else {
        trimmed.to_string()
    }
}

/// Write an upload into the scratch directory
///
/// The directory is created when absent. An existing file with the same
/// name is overwritten.
///
/// # Returns
/// * `std::io::Result<PathBuf>` - Path of the written file
pub fn persist_upload(dir: &Path, filename: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
    if !dir.exists() {
        create_dir_all(dir)?;
    }

    let path = dir.join(filename);
    fs::write(&path, bytes)?;

    Ok(path)
}
