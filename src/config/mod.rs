//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! options file (TOML) or CLI flags
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (defaults, checks, path resolution)
//!     → ServerConfig (validated, immutable)
//!     → consumed by the server factory
//! ```
//!
//! # Design Decisions
//! - Options are immutable once validated; changes require a restart
//! - All fields have defaults so an empty options document is valid
//! - Syntactic checks (serde) are separate from semantic checks (validation)

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::ConfigError;
pub use loader::load_options;
pub use schema::{LoggerSetting, OneOrMany, ServerConfig, ServerOptions, StaticMount};
pub use validation::validate;
