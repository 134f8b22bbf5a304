//! Admission and payload inspection subsystem.
//!
//! # Data Flow
//! ```text
//! Accepted connection
//!     → gate.rs (deny/allow lists, decided before any read)
//!     → payload received by net layer
//!     → signatures.rs (case-insensitive pattern scan)
//!     → suspicious flag on the recorded event
//! ```
//!
//! # Design Decisions
//! - Both the gate and the signature set are built once at startup and are
//!   read-only afterwards, so they are shared across connection tasks
//!   without locking

pub mod gate;
pub mod signatures;

pub use gate::{AddressGate, GateDecision};
pub use signatures::SignatureSet;
