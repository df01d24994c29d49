//! Built-in signature rules.
//!
//! The table is declaration-ordered: index is the final tie-break during
//! candidate selection. Patterns are exact bytes, no wildcards.

use super::SignatureRule;

/// Compiled-in signature table.
///
/// Container/subtype pairs (RIFF vs. WAVE/AVI) rely on the priority column:
/// the subtype rules at offset 8 outrank the generic container rule at
/// offset 0.
pub const BUILTIN_RULES: &[SignatureRule] = &[
    SignatureRule {
        offset: 0,
        pattern: &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A],
        label: "PNG Image",
        priority: 0,
    },
    SignatureRule {
        offset: 0,
        pattern: &[0xFF, 0xD8, 0xFF],
        label: "JPEG Image",
        priority: 0,
    },
    SignatureRule {
        offset: 0,
        pattern: b"GIF87a",
        label: "GIF Image",
        priority: 0,
    },
    SignatureRule {
        offset: 0,
        pattern: b"GIF89a",
        label: "GIF Image",
        priority: 0,
    },
    SignatureRule {
        offset: 0,
        pattern: b"%PDF-",
        label: "PDF Document",
        priority: 0,
    },
    SignatureRule {
        offset: 0,
        pattern: &[0x50, 0x4B, 0x03, 0x04],
        label: "ZIP Archive",
        priority: 0,
    },
    SignatureRule {
        offset: 0,
        pattern: &[0x50, 0x4B, 0x05, 0x06],
        label: "ZIP Archive",
        priority: 0,
    },
    SignatureRule {
        offset: 0,
        pattern: &[0x50, 0x4B, 0x07, 0x08],
        label: "ZIP Archive",
        priority: 0,
    },
    SignatureRule {
        offset: 0,
        pattern: &[0x52, 0x61, 0x72, 0x21, 0x1A, 0x07],
        label: "RAR Archive",
        priority: 0,
    },
    SignatureRule {
        offset: 0,
        pattern: &[0x7F, 0x45, 0x4C, 0x46],
        label: "ELF Executable",
        priority: 0,
    },
    SignatureRule {
        offset: 0,
        pattern: &[0x1F, 0x8B],
        label: "GZIP Archive",
        priority: 0,
    },
    SignatureRule {
        offset: 0,
        pattern: b"BZh",
        label: "BZip2 Archive",
        priority: 0,
    },
    SignatureRule {
        offset: 0,
        pattern: &[0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C],
        label: "7-Zip Archive",
        priority: 0,
    },
    SignatureRule {
        offset: 0,
        pattern: b"RIFF",
        label: "RIFF Container",
        priority: 0,
    },
    SignatureRule {
        offset: 8,
        pattern: b"WAVE",
        label: "WAV Audio",
        priority: 10,
    },
    SignatureRule {
        offset: 8,
        pattern: b"AVI ",
        label: "AVI Video",
        priority: 10,
    },
    SignatureRule {
        offset: 257,
        pattern: b"ustar",
        label: "TAR Archive",
        priority: 0,
    },
];
