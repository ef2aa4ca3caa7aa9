//! Options loading from disk.

use std::path::Path;

use crate::config::error::ConfigError;
use crate::config::schema::ServerOptions;

/// Load server options from a TOML file.
///
/// Syntactic problems (unreadable file, invalid TOML) surface here; semantic
/// checks happen in [`validate`](crate::config::validate).
pub fn load_options(path: &Path) -> Result<ServerOptions, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let options: ServerOptions = toml::from_str(&content)?;
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_options_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("server.toml");
        std::fs::write(&path, "port = 7331\naddress = \"0.0.0.0\"").unwrap();

        let options = load_options(&path).unwrap();
        assert_eq!(options.port, Some(7331));
        assert_eq!(options.address.as_deref(), Some("0.0.0.0"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_options(Path::new("/nonexistent/server.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("server.toml");
        std::fs::write(&path, "port = [not toml").unwrap();

        let err = load_options(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
