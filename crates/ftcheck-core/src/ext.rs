//! Extension expectations and mismatch computation.
//!
//! The table mapping detected labels to accepted extensions is supplied by
//! the caller; this module only evaluates it. A mismatch is reported solely
//! when the magic matched, the file has an extension, and the table has an
//! opinion about the detected label.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Mapping from detected type label to the set of accepted extensions.
///
/// Extensions are stored lowercased and dot-prefixed (`.jpg`).
#[derive(Debug, Clone, Default)]
pub struct ExtensionTable {
    expected: BTreeMap<String, BTreeSet<String>>,
}

impl ExtensionTable {
    /// Creates an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from `(label, extensions)` entries
    pub fn from_entries(entries: &[(&str, &[&str])]) -> Self {
        let mut table = Self::new();
        for (label, exts) in entries {
            table.insert(label, exts.iter().copied());
        }
        table
    }

    /// Adds or extends the accepted extensions for a label
    pub fn insert<'a>(&mut self, label: &str, exts: impl IntoIterator<Item = &'a str>) {
        self.expected
            .entry(label.to_string())
            .or_default()
            .extend(exts.into_iter().map(str::to_lowercase));
    }

    /// Accepted extensions for a label, if the table has an entry for it
    pub fn expected_for(&self, label: &str) -> Option<&BTreeSet<String>> {
        self.expected.get(label)
    }
}

/// Computes `(extension, mismatch)` for a detection outcome.
///
/// The extension is the path's final suffix, lowercased and dot-prefixed,
/// or empty when the path has none.
pub fn check(
    path: &Path,
    file_type: &str,
    matched: bool,
    table: &ExtensionTable,
) -> (String, bool) {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default();

    if ext.is_empty() || !matched {
        return (ext, false);
    }

    let Some(expected) = table.expected_for(file_type) else {
        return (ext, false);
    };
    let mismatch = !expected.contains(&ext);
    (ext, mismatch)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ExtensionTable {
        ExtensionTable::from_entries(&[
            ("JPEG Image", &[".jpg", ".jpeg", ".jpe"]),
            ("PNG Image", &[".png"]),
        ])
    }

    #[test]
    fn test_matching_extension_is_not_a_mismatch() {
        let (ext, mismatch) = check(Path::new("photo.jpg"), "JPEG Image", true, &table());
        assert_eq!(ext, ".jpg");
        assert!(!mismatch);
    }

    #[test]
    fn test_wrong_extension_is_a_mismatch() {
        let (ext, mismatch) = check(Path::new("photo.png"), "JPEG Image", true, &table());
        assert_eq!(ext, ".png");
        assert!(mismatch);
    }

    #[test]
    fn test_extension_comparison_is_case_insensitive() {
        let (ext, mismatch) = check(Path::new("PHOTO.JPEG"), "JPEG Image", true, &table());
        assert_eq!(ext, ".jpeg");
        assert!(!mismatch);
    }

    #[test]
    fn test_no_extension_never_mismatches() {
        let (ext, mismatch) = check(Path::new("photo"), "JPEG Image", true, &table());
        assert_eq!(ext, "");
        assert!(!mismatch);
    }

    #[test]
    fn test_unmatched_magic_never_mismatches() {
        let (ext, mismatch) = check(Path::new("a.jpg"), "Unknown File Type", false, &table());
        assert_eq!(ext, ".jpg");
        assert!(!mismatch);
    }

    #[test]
    fn test_label_absent_from_table_never_mismatches() {
        let (_, mismatch) = check(Path::new("a.bin"), "ELF Executable", true, &table());
        assert!(!mismatch);
    }

    #[test]
    fn test_only_final_suffix_counts() {
        let mut table = ExtensionTable::new();
        table.insert("GZIP Archive", [".gz", ".tgz"]);
        let (ext, mismatch) = check(Path::new("backup.tar.gz"), "GZIP Archive", true, &table);
        assert_eq!(ext, ".gz");
        assert!(!mismatch);
    }
}
