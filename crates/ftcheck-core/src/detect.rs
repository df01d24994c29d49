//! Single-file detection.
//!
//! Opens one file, reads a bounded prefix, runs the matcher, and assembles
//! a per-file report. Access failures surface as typed errors from the
//! taxonomy in [`crate::error`] rather than being folded into a fake
//! "unknown" success.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::trace;

use crate::error::{Error, Result};
use crate::magic::{MagicMatch, SignatureDb};

/// Fully assembled report for one successfully inspected file.
///
/// Immutable once constructed; a failed detection is an [`Error`], never a
/// partially filled report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectionReport {
    /// Path that was inspected
    pub path: PathBuf,
    /// Winning label, or `Unknown File Type`
    pub file_type: String,
    /// File size taken from the open handle
    pub size_bytes: u64,
    /// Matcher outcome
    pub magic: MagicMatch,
}

/// Detects the content type of one file using the built-in database.
pub fn detect(path: impl AsRef<Path>) -> Result<DetectionReport> {
    detect_with_db(path, SignatureDb::builtin())
}

/// Detects the content type of one file against the given database.
///
/// The file's size is taken from the open handle so that no separate stat
/// can race against the read, and at most [`SignatureDb::min_prefix_len`]
/// bytes are read regardless of file size. The handle is dropped on every
/// exit path.
pub fn detect_with_db(path: impl AsRef<Path>, db: &SignatureDb) -> Result<DetectionReport> {
    let path = path.as_ref();

    // Classify before opening: opening a FIFO for reading would block
    let meta = std::fs::metadata(path).map_err(|e| Error::from_io(path, e))?;
    if meta.is_dir() {
        return Err(Error::is_directory(path));
    }
    if !meta.is_file() {
        return Err(Error::not_a_regular_file(path));
    }

    let mut file = File::open(path).map_err(|e| Error::from_io(path, e))?;
    let size_bytes = file
        .metadata()
        .map_err(|e| Error::from_io(path, e))?
        .len();

    let mut prefix = vec![0u8; db.min_prefix_len()];
    let filled = read_prefix(&mut file, &mut prefix).map_err(|e| Error::from_io(path, e))?;
    prefix.truncate(filled);

    trace!(
        "read {} prefix bytes from {} ({} bytes total)",
        filled,
        path.display(),
        size_bytes
    );

    let magic = db.match_prefix(&prefix);
    Ok(DetectionReport {
        path: path.to_path_buf(),
        file_type: magic.label.clone(),
        size_bytes,
        magic,
    })
}

/// Fills `buf` from the reader, stopping early at end of file.
///
/// Returns the number of bytes actually read.
fn read_prefix(file: &mut File, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match file.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::magic::UNKNOWN_LABEL;
    use std::io::Write;
    use tempfile::TempDir;

    const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    fn write_file(dir: &TempDir, name: &str, data: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(data).unwrap();
        path
    }

    #[test]
    fn test_detect_png_with_padding() {
        let dir = TempDir::new().unwrap();
        let mut payload = PNG_MAGIC.to_vec();
        payload.extend_from_slice(&[0x00; 10]);
        let path = write_file(&dir, "image.png", &payload);

        let report = detect(&path).unwrap();
        assert_eq!(report.file_type, "PNG Image");
        assert_eq!(report.size_bytes, payload.len() as u64);
        assert!(report.magic.matched);
        assert_eq!(report.magic.offset, Some(0));
        assert_eq!(
            report.magic.signature_hex.as_deref(),
            Some("89504E470D0A1A0A")
        );
    }

    #[test]
    fn test_detect_unknown_bytes() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "mystery.bin", &[0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);

        let report = detect(&path).unwrap();
        assert_eq!(report.file_type, UNKNOWN_LABEL);
        assert_eq!(report.size_bytes, 6);
        assert!(!report.magic.matched);
        assert_eq!(report.magic.offset, None);
        assert_eq!(report.magic.signature_hex, None);
    }

    #[test]
    fn test_detect_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "empty", &[]);

        let report = detect(&path).unwrap();
        assert_eq!(report.file_type, UNKNOWN_LABEL);
        assert_eq!(report.size_bytes, 0);
        assert!(!report.magic.matched);
    }

    #[test]
    fn test_detect_reads_bounded_prefix_of_large_file() {
        let dir = TempDir::new().unwrap();
        let mut payload = b"%PDF-1.7".to_vec();
        payload.resize(64 * 1024, b'x');
        let path = write_file(&dir, "big.pdf", &payload);

        let report = detect(&path).unwrap();
        assert_eq!(report.file_type, "PDF Document");
        assert_eq!(report.size_bytes, payload.len() as u64);
    }

    #[test]
    fn test_detect_missing_path() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("does_not_exist.bin");

        let err = detect(&missing).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
        assert_eq!(err.code(), "ENOENT");
    }

    #[test]
    fn test_detect_directory() {
        let dir = TempDir::new().unwrap();

        let err = detect(dir.path()).unwrap_err();
        assert!(matches!(err, Error::IsDirectory { .. }));
        assert_eq!(err.code(), "EISDIR");
    }

    #[test]
    fn test_detect_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "a.gif", b"GIF89a more bytes");

        let first = detect(&path).unwrap();
        let second = detect(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_detect_with_custom_db() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "custom", b"MAGIC!");

        let db = SignatureDb::new(vec![crate::magic::SignatureRule {
            offset: 0,
            pattern: b"MAGIC!",
            label: "Custom Format",
            priority: 0,
        }]);
        let report = detect_with_db(&path, &db).unwrap();
        assert_eq!(report.file_type, "Custom Format");
    }
}
