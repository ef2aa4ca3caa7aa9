//! Option validation and normalization.
//!
//! # Responsibilities
//! - Merge defaults under user-supplied options
//! - Reject the first invalid field with an error naming key and value
//! - Enforce prefix/static pairing rules
//! - Resolve path options against an explicit base directory
//!
//! # Design Decisions
//! - Validation is a pure function: no filesystem or network access
//! - The base directory is an argument, never read from process state

use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};

use tracing::level_filters::LevelFilter;

use crate::config::error::ConfigError;
use crate::config::schema::{LoggerSetting, OneOrMany, ServerConfig, ServerOptions, StaticMount};

const DEFAULT_ADDRESS: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
const DEFAULT_PORT: u16 = 0;
const DEFAULT_PREFIX: &str = "/";
const DEFAULT_ROOT: &str = ".";

/// Validate user options and produce the runtime configuration.
///
/// Fields are checked in a fixed order and the first invalid one aborts
/// validation. Relative paths resolve against `base_dir`.
pub fn validate(options: &ServerOptions, base_dir: &Path) -> Result<ServerConfig, ConfigError> {
    let address = match &options.address {
        Some(raw) => raw
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::invalid("address", "an IP address", raw))?,
        None => DEFAULT_ADDRESS,
    };

    let hostname = options
        .hostname
        .clone()
        .unwrap_or_else(|| address.to_string());

    let logger = match &options.logger {
        None | Some(LoggerSetting::Enabled(false)) => LevelFilter::OFF,
        Some(LoggerSetting::Enabled(true)) => LevelFilter::INFO,
        Some(LoggerSetting::Level(level)) => level.parse::<LevelFilter>().map_err(|_| {
            ConfigError::invalid("logger", "a boolean or a log level name", level)
        })?,
    };

    let port = options.port.unwrap_or(DEFAULT_PORT);

    if let Some(prefix) = &options.prefix {
        for value in prefix.iter() {
            if !value.starts_with('/') {
                return Err(ConfigError::invalid(
                    "prefix",
                    "a URL path starting with `/`",
                    value,
                ));
            }
        }
    }

    let root = resolve(base_dir, options.root.as_deref().unwrap_or(Path::new(DEFAULT_ROOT)));

    let mounts = build_mounts(options, base_dir, &root)?;

    let mut seen = Vec::with_capacity(mounts.len());
    for mount in &mounts {
        if seen.contains(&mount.prefix.as_str()) {
            return Err(ConfigError::DuplicatePrefix {
                prefix: mount.prefix.clone(),
            });
        }
        seen.push(mount.prefix.as_str());
    }

    Ok(ServerConfig {
        address,
        hostname,
        logger,
        port,
        root,
        mounts,
        trust_proxy: options.trust_proxy.unwrap_or(false),
        ignore_trailing_slash: options.ignore_trailing_slash.unwrap_or(true),
    })
}

/// Pair static directories with URL prefixes.
///
/// Without `static`, the root directory is mounted at the (single) prefix.
/// A single directory takes a single prefix; a directory list takes either a
/// prefix list of equal length or one shared prefix.
fn build_mounts(
    options: &ServerOptions,
    base_dir: &Path,
    root: &Path,
) -> Result<Vec<StaticMount>, ConfigError> {
    match (&options.static_dirs, &options.prefix) {
        (None, Some(OneOrMany::Many(prefixes))) => Err(ConfigError::PrefixesWithoutStatic {
            prefixes: prefixes.len(),
        }),
        (None, prefix) => {
            let prefix = match prefix {
                Some(OneOrMany::One(value)) => value.clone(),
                _ => DEFAULT_PREFIX.to_string(),
            };
            Ok(vec![StaticMount {
                prefix,
                dirs: vec![root.to_path_buf()],
            }])
        }
        (Some(OneOrMany::One(dir)), prefix) => {
            let prefix = match prefix {
                None => DEFAULT_PREFIX.to_string(),
                Some(OneOrMany::One(value)) => value.clone(),
                Some(OneOrMany::Many(_)) => return Err(ConfigError::SinglePrefixRequired),
            };
            Ok(vec![StaticMount {
                prefix,
                dirs: vec![resolve(base_dir, Path::new(dir))],
            }])
        }
        (Some(OneOrMany::Many(dirs)), prefix) => {
            let dirs: Vec<PathBuf> = dirs
                .iter()
                .map(|dir| resolve(base_dir, Path::new(dir)))
                .collect();
            match prefix {
                // A lone prefix is shared by every directory.
                None => Ok(vec![StaticMount {
                    prefix: DEFAULT_PREFIX.to_string(),
                    dirs,
                }]),
                Some(OneOrMany::One(value)) => Ok(vec![StaticMount {
                    prefix: value.clone(),
                    dirs,
                }]),
                Some(OneOrMany::Many(prefixes)) => {
                    if prefixes.len() != dirs.len() {
                        return Err(ConfigError::MountMismatch {
                            prefixes: prefixes.len(),
                            dirs: dirs.len(),
                        });
                    }
                    Ok(prefixes
                        .iter()
                        .zip(dirs)
                        .map(|(prefix, dir)| StaticMount {
                            prefix: prefix.clone(),
                            dirs: vec![dir],
                        })
                        .collect())
                }
            }
        }
    }
}

fn resolve(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
