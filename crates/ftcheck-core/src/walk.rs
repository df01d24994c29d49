//! Path expansion: user-supplied paths to a flat list of regular files.
//!
//! Each input is classified independently; failures become [`Problem`]
//! records carried alongside the resolved files, so one bad input never
//! stops the rest from being processed. The expansion as a whole cannot
//! fail.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::error::{Error, Problem};

/// Expands files and directories into a deduplicated, sorted file list.
///
/// Regular files are included directly; directories are enumerated (one
/// level deep, or the whole subtree with `recursive`); everything else is
/// recorded as a problem. Symlinks inside directories are not followed.
/// The returned list is sorted ascending by path and free of duplicates,
/// independent of directory-entry ordering.
pub fn expand_paths(paths: &[PathBuf], recursive: bool) -> (Vec<PathBuf>, Vec<Problem>) {
    let mut files = BTreeSet::new();
    let mut problems = Vec::new();

    for path in paths {
        expand_one(path, recursive, &mut files, &mut problems);
    }

    debug!(
        "expanded {} input(s) into {} file(s), {} problem(s)",
        paths.len(),
        files.len(),
        problems.len()
    );
    (files.into_iter().collect(), problems)
}

/// One-shot classification of a single input path.
fn expand_one(
    path: &Path,
    recursive: bool,
    files: &mut BTreeSet<PathBuf>,
    problems: &mut Vec<Problem>,
) {
    let meta = match fs::metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            // A dangling symlink exists as a link entry but points nowhere
            let err = if fs::symlink_metadata(path).is_ok() {
                Error::not_a_regular_file(path)
            } else {
                Error::not_found(path)
            };
            problems.push(err.to_problem());
            return;
        }
        Err(e) => {
            problems.push(Error::from_io(path, e).to_problem());
            return;
        }
    };

    if meta.is_file() {
        trace!("including file {}", path.display());
        files.insert(path.to_path_buf());
    } else if meta.is_dir() {
        enumerate_dir(path, recursive, files, problems);
    } else {
        problems.push(Error::not_a_regular_file(path).to_problem());
    }
}

/// Walks a directory, collecting regular files and recording per-entry
/// failures without terminating the walk.
fn enumerate_dir(
    dir: &Path,
    recursive: bool,
    files: &mut BTreeSet<PathBuf>,
    problems: &mut Vec<Problem>,
) {
    let mut walker = WalkDir::new(dir).follow_links(false).min_depth(1);
    if !recursive {
        walker = walker.max_depth(1);
    }

    for entry in walker {
        match entry {
            Ok(entry) => {
                // file_type() is the entry itself: symlinks are excluded
                if entry.file_type().is_file() {
                    trace!("including file {}", entry.path().display());
                    files.insert(entry.into_path());
                }
            }
            Err(err) => {
                problems.push(walk_problem(dir, err));
            }
        }
    }
}

/// Maps a walk failure onto the taxonomy, keyed to the path that failed.
fn walk_problem(dir: &Path, err: walkdir::Error) -> Problem {
    let path = err.path().unwrap_or(dir).to_path_buf();
    match err.into_io_error() {
        Some(io) if io.kind() == std::io::ErrorKind::PermissionDenied => {
            Error::permission_denied(path, io).to_problem()
        }
        Some(io) => Error::io(path, io).to_problem(),
        None => Error::io(path, std::io::Error::other("filesystem loop detected")).to_problem(),
    }
}
