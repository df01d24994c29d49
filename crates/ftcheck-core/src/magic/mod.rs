//! Magic-number signature database and matcher.
//!
//! This module holds the compiled-in table of file signatures and the
//! candidate-selection algorithm that picks at most one winner for a byte
//! prefix.
//!
//! ## Algorithm Overview
//!
//! 1. A rule matches when the prefix is long enough to cover the rule's
//!    span and the bytes at the rule's offset equal its pattern exactly
//! 2. All matching rules are ranked by a single comparator: declared
//!    priority first, then pattern length (more specific wins), then
//!    declaration order (earlier wins)
//! 3. The fold over candidates yields exactly one winner, or an
//!    "Unknown File Type" outcome when nothing matched
//!
//! Matching is pure and performs no I/O; the database is immutable after
//! construction and safe to share across threads.

mod rules;

use std::cmp::Ordering;
use std::fmt::Write as FmtWrite;
use std::sync::OnceLock;

use serde::Serialize;
use tracing::trace;

pub use rules::BUILTIN_RULES;

/// Label reported when no signature matches
pub const UNKNOWN_LABEL: &str = "Unknown File Type";

/// A single signature rule: a byte pattern expected at a fixed offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureRule {
    /// Byte offset at which the pattern must appear
    pub offset: usize,
    /// Exact bytes expected at `offset` (no wildcards)
    pub pattern: &'static [u8],
    /// Human-readable type label reported on a match
    pub label: &'static str,
    /// Tie-break weight; higher wins over longer
    pub priority: i32,
}

impl SignatureRule {
    /// Minimum prefix length needed to test this rule
    pub fn span(&self) -> usize {
        self.offset + self.pattern.len()
    }

    /// Whether this rule matches the given prefix.
    ///
    /// A prefix too short to cover the rule's span never matches; it is
    /// not an error.
    pub fn matches(&self, prefix: &[u8]) -> bool {
        prefix.len() >= self.span() && &prefix[self.offset..self.span()] == self.pattern
    }
}

/// Outcome of matching a prefix against the database
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MagicMatch {
    /// Whether any rule matched
    pub matched: bool,
    /// Label of the winning rule, or [`UNKNOWN_LABEL`]
    #[serde(skip)]
    pub label: String,
    /// Offset of the winning rule's pattern
    pub offset: Option<usize>,
    /// The winning pattern's bytes as uppercase hexadecimal
    #[serde(rename = "signature")]
    pub signature_hex: Option<String>,
}

impl MagicMatch {
    /// The no-match outcome
    pub fn unknown() -> Self {
        Self {
            matched: false,
            label: UNKNOWN_LABEL.to_string(),
            offset: None,
            signature_hex: None,
        }
    }

    fn hit(rule: &SignatureRule) -> Self {
        Self {
            matched: true,
            label: rule.label.to_string(),
            offset: Some(rule.offset),
            signature_hex: Some(to_hex_upper(rule.pattern)),
        }
    }
}

/// Immutable, ordered set of signature rules
#[derive(Debug, Clone)]
pub struct SignatureDb {
    rules: Vec<SignatureRule>,
    min_prefix: usize,
}

impl SignatureDb {
    /// Creates a database from an ordered rule list.
    ///
    /// Declaration order is significant: it is the final tie-break between
    /// otherwise equal candidates.
    pub fn new(rules: Vec<SignatureRule>) -> Self {
        let min_prefix = rules.iter().map(SignatureRule::span).max().unwrap_or(0);
        Self { rules, min_prefix }
    }

    /// Shared instance built from [`BUILTIN_RULES`], constructed on first
    /// use and never mutated afterwards
    pub fn builtin() -> &'static SignatureDb {
        static DB: OnceLock<SignatureDb> = OnceLock::new();
        DB.get_or_init(|| SignatureDb::new(BUILTIN_RULES.to_vec()))
    }

    /// Minimum prefix length a caller must supply to test every rule
    pub fn min_prefix_len(&self) -> usize {
        self.min_prefix
    }

    /// Rules in declaration order
    pub fn rules(&self) -> &[SignatureRule] {
        &self.rules
    }

    /// Selects the best-matching rule for the given prefix.
    ///
    /// Never fails: an unmatched prefix is a normal outcome, and a prefix
    /// shorter than [`Self::min_prefix_len`] simply cannot match the rules
    /// it cannot fully cover.
    pub fn match_prefix(&self, prefix: &[u8]) -> MagicMatch {
        let winner = self
            .rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| rule.matches(prefix))
            .reduce(|best, candidate| {
                match compare_candidates(candidate, best) {
                    Ordering::Greater => candidate,
                    _ => best,
                }
            });

        match winner {
            Some((index, rule)) => {
                trace!(
                    "prefix of {} bytes matched rule {} ({})",
                    prefix.len(),
                    index,
                    rule.label
                );
                MagicMatch::hit(rule)
            }
            None => MagicMatch::unknown(),
        }
    }
}

impl Default for SignatureDb {
    fn default() -> Self {
        Self::new(BUILTIN_RULES.to_vec())
    }
}

/// Total order over matching candidates: priority, then pattern length,
/// then declaration index (earlier wins, so a lower index ranks higher).
fn compare_candidates(a: (usize, &SignatureRule), b: (usize, &SignatureRule)) -> Ordering {
    a.1.priority
        .cmp(&b.1.priority)
        .then_with(|| a.1.pattern.len().cmp(&b.1.pattern.len()))
        .then_with(|| b.0.cmp(&a.0))
}

/// Render bytes as uppercase hexadecimal, e.g. `89504E470D0A1A0A`
fn to_hex_upper(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut out, byte| {
        // write! into a String cannot fail
        let _ = write!(out, "{byte:02X}");
        out
    })
}
