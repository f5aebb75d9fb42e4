// Path: crates/cli/src/settings.rs
//! Configuration for one invocation: an optional TOML file, then environment
//! overrides.

use anyhow::{Context, Result};
use cfp_types::config::ClientConfig;
use std::path::Path;

/// Overrides `api_url`.
pub const API_URL_ENV: &str = "CFP_API_URL";
/// Overrides `rpc_url`.
pub const RPC_URL_ENV: &str = "CFP_RPC_URL";

/// Loads the configuration from `path` (defaults when absent) and applies the
/// process environment on top.
pub fn load(path: Option<&Path>) -> Result<ClientConfig> {
    let mut config = match path {
        Some(p) => ClientConfig::load(p)
            .with_context(|| format!("Failed to load configuration from {}", p.display()))?,
        None => ClientConfig::default(),
    };
    apply_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Applies `CFP_API_URL` and `CFP_RPC_URL` as returned by `var`. Blank values
/// are ignored.
pub fn apply_overrides(config: &mut ClientConfig, var: impl Fn(&str) -> Option<String>) {
    let non_blank = |key: &str| {
        var(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };
    if let Some(url) = non_blank(API_URL_ENV) {
        tracing::debug!(target: "config", %url, "api_url overridden from environment");
        config.api_url = url;
    }
    if let Some(url) = non_blank(RPC_URL_ENV) {
        tracing::debug!(target: "config", %url, "rpc_url overridden from environment");
        config.rpc_url = url;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn environment_wins_over_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_url = \"http://backend:5000/\"").unwrap();
        writeln!(file, "rpc_url = \"http://node:8545\"").unwrap();

        let mut config = ClientConfig::load(file.path()).unwrap();
        let env = HashMap::from([(API_URL_ENV, "http://override:9000/")]);
        apply_overrides(&mut config, |k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.api_url, "http://override:9000/");
        assert_eq!(config.rpc_url, "http://node:8545");
    }

    #[test]
    fn blank_overrides_are_ignored() {
        let mut config = ClientConfig::default();
        apply_overrides(&mut config, |_| Some("  ".to_string()));
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load(Some(Path::new("/nonexistent/cfp.toml"))).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/cfp.toml"));
    }
}
