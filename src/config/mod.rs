//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → SnareConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; filter lists and signature patterns
//!   do not change for the process lifetime
//! - All fields have defaults to allow minimal (or absent) configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::FilterConfig;
pub use schema::GeoConfig;
pub use schema::ListenerConfig;
pub use schema::SnareConfig;
pub use schema::StorageConfig;
