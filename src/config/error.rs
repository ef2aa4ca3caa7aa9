//! Configuration error definitions.

use thiserror::Error;

/// Errors produced while loading or validating server options.
///
/// All of these are unrecoverable setup errors: the caller must fix the
/// options and retry construction. None of them is raised after a network
/// resource has been allocated.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Options file could not be read.
    #[error("failed to read options file: {0}")]
    Io(#[from] std::io::Error),

    /// Options file is not valid TOML.
    #[error("failed to parse options file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A recognized option carries an unusable value.
    #[error("invalid `{key}` option: expected {expected}, got `{value}`")]
    InvalidOption {
        key: &'static str,
        expected: &'static str,
        value: String,
    },

    /// `static` and `prefix` lists have different lengths.
    #[error("number of prefixes ({prefixes}) must equal the number of static directories ({dirs})")]
    MountMismatch { prefixes: usize, dirs: usize },

    /// A single static directory needs a single prefix.
    #[error("a single `prefix` is required when `static` is a single directory")]
    SinglePrefixRequired,

    /// A prefix list was given without a static directory list to pair with.
    #[error("`prefix` lists {prefixes} mount paths but no `static` directory list was given")]
    PrefixesWithoutStatic { prefixes: usize },

    /// Two mounts claim the same URL prefix.
    #[error("duplicate static mount prefix `{prefix}`")]
    DuplicatePrefix { prefix: String },
}

impl ConfigError {
    /// Build an [`InvalidOption`](ConfigError::InvalidOption) error naming
    /// the offending key and value.
    pub(crate) fn invalid(
        key: &'static str,
        expected: &'static str,
        value: impl ToString,
    ) -> Self {
        ConfigError::InvalidOption {
            key,
            expected,
            value: value.to_string(),
        }
    }
}
