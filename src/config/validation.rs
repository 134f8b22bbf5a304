//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the bind address parses as a socket address
//! - Check signature patterns compile
//! - Validate value ranges (limits > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SnareConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::SnareConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug)]
pub enum ValidationError {
    /// Bind address is not a valid socket address.
    BadBindAddress(String),
    /// A signature pattern failed to compile.
    BadPattern { pattern: String, reason: String },
    /// A numeric limit is zero or otherwise unusable.
    BadLimit(&'static str),
    /// A sink path is empty.
    EmptyPath(&'static str),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::BadBindAddress(addr) => {
                write!(f, "invalid bind address '{}'", addr)
            }
            ValidationError::BadPattern { pattern, reason } => {
                write!(f, "invalid signature pattern '{}': {}", pattern, reason)
            }
            ValidationError::BadLimit(field) => write!(f, "{} must be greater than zero", field),
            ValidationError::EmptyPath(field) => write!(f, "{} must not be empty", field),
        }
    }
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &SnareConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BadBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.listener.max_connections == 0 {
        errors.push(ValidationError::BadLimit("listener.max_connections"));
    }
    if config.listener.max_payload_bytes == 0 {
        errors.push(ValidationError::BadLimit("listener.max_payload_bytes"));
    }
    if config.geo.timeout_secs == 0 {
        errors.push(ValidationError::BadLimit("geo.timeout_secs"));
    }

    if config.storage.json_log_path.is_empty() {
        errors.push(ValidationError::EmptyPath("storage.json_log_path"));
    }
    if config.storage.db_path.is_empty() {
        errors.push(ValidationError::EmptyPath("storage.db_path"));
    }

    for pattern in &config.signatures.patterns {
        if let Err(e) = regex::RegexBuilder::new(pattern).case_insensitive(true).build() {
            errors.push(ValidationError::BadPattern {
                pattern: pattern.clone(),
                reason: e.to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
