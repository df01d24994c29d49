//! # ftcheck-core
//!
//! A library for identifying a file's true content type from its leading
//! bytes, independent of the file's extension.
//!
//! This crate provides the core functionality for:
//! - Matching byte prefixes against a database of known signatures
//! - Inspecting single files and assembling structured reports
//! - Expanding user-supplied paths into a flat list of regular files while
//!   collecting non-fatal problems
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`magic`]: Signature database and candidate-selection matcher
//! - [`detect`]: Per-file detection and report assembly
//! - [`walk`]: Path expansion and problem collection
//! - [`ext`]: Extension-expectation lookup for mismatch reporting
//! - [`error`]: Error taxonomy and problem records
//!
//! ## Example
//!
//! ```no_run
//! use ftcheck_core::{detect, expand_paths};
//! use std::path::PathBuf;
//!
//! let inputs = vec![PathBuf::from("./downloads")];
//! let (files, problems) = expand_paths(&inputs, true);
//!
//! for problem in &problems {
//!     eprintln!("[{}] {}", problem.code, problem.message);
//! }
//! for file in files {
//!     let report = detect(&file)?;
//!     println!("{}: {}", report.path.display(), report.file_type);
//! }
//! # Ok::<(), ftcheck_core::Error>(())
//! ```
//!
//! ## Concurrency
//!
//! The signature database is immutable after construction and matching is
//! a pure function, so independent detection calls are safe to run from
//! multiple threads without locking.

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod detect;
pub mod error;
pub mod ext;
pub mod magic;
pub mod walk;

// Re-export primary types for convenience
pub use detect::{detect, detect_with_db, DetectionReport};
pub use error::{Error, Problem, Result};
pub use ext::ExtensionTable;
pub use magic::{MagicMatch, SignatureDb, SignatureRule, BUILTIN_RULES, UNKNOWN_LABEL};
pub use walk::expand_paths;

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
