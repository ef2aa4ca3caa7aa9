//! Front-end bundler configuration.
//!
//! A static descriptor consumed by the external bundler that produces the
//! coverage viewer's client-side bundle. There is no runtime behavior here;
//! the server only serves the resulting file as a static asset.

use std::collections::BTreeMap;

use serde::Serialize;

/// Build descriptor for the client-side bundle.
///
/// Serializes to the camelCase document the external bundler expects.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundlerConfig {
    /// Entry modules, relative to the repository root.
    pub entry_points: Vec<String>,

    /// Whether dependencies are inlined into a single output file.
    pub bundle: bool,

    /// Output path of the minified bundle.
    pub outfile: String,

    pub minify: bool,

    pub sourcemap: bool,

    /// ECMAScript compilation target.
    pub target: String,

    /// JSX pragma.
    pub jsx_factory: String,

    /// JSX fragment pragma.
    pub jsx_fragment: String,

    /// Runtime import source for the JSX transform.
    pub jsx_import_source: String,

    /// Module aliases substituting the compatibility layer for the
    /// conventional framework import names.
    pub alias: BTreeMap<String, String>,
}

impl Default for BundlerConfig {
    fn default() -> Self {
        let mut alias = BTreeMap::new();
        alias.insert("react".to_string(), "preact/compat".to_string());
        alias.insert("react-dom".to_string(), "preact/compat".to_string());
        Self {
            entry_points: vec!["src/index.jsx".to_string()],
            bundle: true,
            outfile: "public/js/bundle.js".to_string(),
            minify: true,
            sourcemap: false,
            target: "es2015".to_string(),
            jsx_factory: "h".to_string(),
            jsx_fragment: "Fragment".to_string(),
            jsx_import_source: "preact".to_string(),
            alias,
        }
    }
}

impl BundlerConfig {
    /// Render the descriptor as pretty-printed JSON for the external tool.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).expect("bundler config serializes")
    }
}
