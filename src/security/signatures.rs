//! Payload signature classification.
//!
//! # Responsibilities
//! - Hold the ordered, compiled set of attack-signature patterns
//! - Classify a decoded payload as suspicious or not
//!
//! # Design Decisions
//! - Patterns are compiled once at startup and shared immutably; nothing is
//!   recompiled per connection
//! - Classification is existential: any match makes the payload suspicious
//! - Matching is case-insensitive unanchored search, so a token anywhere in
//!   the payload counts

use regex::{Regex, RegexBuilder};

/// A compiled, ordered set of suspicious-payload signatures.
///
/// The default set covers SQL manipulation verbs, shell invocation tokens,
/// path traversal (plain and URL-encoded), and common recon tool names.
#[derive(Debug)]
pub struct SignatureSet {
    rules: Vec<Regex>,
}

impl SignatureSet {
    /// Compile the given patterns in order. Patterns are matched
    /// case-insensitively.
    pub fn compile(patterns: &[String]) -> Result<Self, regex::Error> {
        let rules = patterns
            .iter()
            .map(|p| RegexBuilder::new(p).case_insensitive(true).build())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// True if any signature matches the payload. Empty payloads never match.
    pub fn is_suspicious(&self, payload: &str) -> bool {
        self.first_match(payload).is_some()
    }

    /// Index of the first matching signature, for operator diagnostics.
    pub fn first_match(&self, payload: &str) -> Option<usize> {
        self.rules.iter().position(|rule| rule.is_match(payload))
    }

    /// Number of compiled signatures.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True if no signatures are configured.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
