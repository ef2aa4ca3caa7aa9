//! Configuration schema definitions.
//!
//! User-supplied options deserialize into [`ServerOptions`]; validation
//! normalizes them into the immutable [`ServerConfig`] consumed by the
//! server factory.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

/// User-facing server options.
///
/// Every field is optional; validation fills in defaults. Unrecognized keys
/// in an options document are ignored rather than rejected.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerOptions {
    /// Server bind address (default "127.0.0.1").
    pub address: Option<String>,

    /// Server hostname (defaults to `address`).
    pub hostname: Option<String>,

    /// Either a boolean enabling logging or an explicit log level name.
    pub logger: Option<LoggerSetting>,

    /// Server port; 0 binds an ephemeral port (the default).
    pub port: Option<u16>,

    /// URL path prefix(es) used as virtual mount path(s) for static
    /// directories.
    pub prefix: Option<OneOrMany>,

    /// Root directory containing the application shell.
    pub root: Option<PathBuf>,

    /// Directory (or directories) containing static files to serve.
    #[serde(rename = "static")]
    pub static_dirs: Option<OneOrMany>,

    /// Whether to trust `X-Forwarded-*` headers from a fronting proxy.
    pub trust_proxy: Option<bool>,

    /// Whether to ignore trailing slashes when matching routes.
    pub ignore_trailing_slash: Option<bool>,
}

/// Logging setting: a plain on/off switch or a level name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum LoggerSetting {
    /// `true` logs at the default level, `false` disables logging.
    Enabled(bool),
    /// An explicit level name ("trace" through "error").
    Level(String),
}

/// A single value or a list of values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    /// Iterate the contained values.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        match self {
            OneOrMany::One(value) => std::slice::from_ref(value).iter(),
            OneOrMany::Many(values) => values.iter(),
        }
        .map(String::as_str)
    }
}

/// Validated server configuration.
///
/// Constructed once by [`validate`](crate::config::validate) and immutable
/// afterwards.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address.
    pub address: IpAddr,

    /// Hostname reported at startup.
    pub hostname: String,

    /// Normalized log level; `OFF` when logging is disabled.
    pub logger: LevelFilter,

    /// Bind port; 0 means the OS picks an ephemeral port.
    pub port: u16,

    /// Absolute root directory holding the application shell.
    pub root: PathBuf,

    /// Static-file mounts, one per URL prefix.
    pub mounts: Vec<StaticMount>,

    /// Whether `X-Forwarded-For` is honored when resolving client addresses.
    pub trust_proxy: bool,

    /// Whether trailing slashes are trimmed before route matching.
    pub ignore_trailing_slash: bool,
}

impl ServerConfig {
    /// Socket address to bind.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }
}

/// A static-file mount: one URL prefix serving one or more directories.
///
/// More than one directory means the directories share the prefix and are
/// tried in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticMount {
    /// URL prefix, always starting with "/".
    pub prefix: String,

    /// Absolute directories served under the prefix.
    pub dirs: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_deserialize_scalar_and_list_forms() {
        let options: ServerOptions = toml::from_str(
            r#"
            prefix = "/assets"
            static = ["www/a", "www/b"]
            logger = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(options.prefix, Some(OneOrMany::One("/assets".into())));
        assert_eq!(
            options.static_dirs,
            Some(OneOrMany::Many(vec!["www/a".into(), "www/b".into()]))
        );
        assert_eq!(options.logger, Some(LoggerSetting::Level("debug".into())));
    }

    #[test]
    fn test_logger_deserializes_boolean_form() {
        let options: ServerOptions = toml::from_str("logger = true").unwrap();
        assert_eq!(options.logger, Some(LoggerSetting::Enabled(true)));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let options: ServerOptions = toml::from_str("foo = 1\nport = 10").unwrap();
        assert_eq!(options.port, Some(10));
        assert!(options.address.is_none());
    }

    #[test]
    fn test_one_or_many_iter() {
        let one = OneOrMany::One("/".into());
        assert_eq!(one.iter().collect::<Vec<_>>(), vec!["/"]);

        let many = OneOrMany::Many(vec!["/a".into(), "/b".into()]);
        assert_eq!(many.iter().collect::<Vec<_>>(), vec!["/a", "/b"]);
    }
}
