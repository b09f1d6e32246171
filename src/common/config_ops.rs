use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use directories::ProjectDirs;
use secrecy::SecretString;
use serde::Deserialize;

use crate::error::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.mgmt.cloud.vmware.com";

#[derive(Debug, Deserialize)]
pub struct VracConfig {
  pub base_url: String,
  /// vRA/CSP API refresh token used to mint bearer tokens.
  pub refresh_token: Option<SecretString>,
  /// PEM file with an extra root CA, only needed for on-prem installs.
  pub root_cert_file_path: Option<PathBuf>,
  /// '$filter' expression applied when fetching fabric images.
  pub image_filter: Option<String>,
  #[serde(default)]
  pub add_test_mappings: bool,
  #[serde(default)]
  pub update_prod_mappings: bool,
  pub log_level: Option<String>,
  pub audit_file: Option<PathBuf>,
}

/// Read the configuration file (TOML) and the VRAC_* environment variables,
/// env vars win. Default file location follows the XDG Base Directory
/// Specification.
pub fn get_configuration(
  config_file_path_opt: Option<&Path>,
) -> Result<VracConfig, Error> {
  let config_file_path = match config_file_path_opt {
    Some(config_file_path) => config_file_path.to_path_buf(),
    None => {
      let project_dirs = ProjectDirs::from("", "", "vrac").ok_or_else(|| {
        Error::Message(
          "Could not resolve home directory for configuration file"
            .to_string(),
        )
      })?;

      project_dirs.config_dir().join("config.toml")
    }
  };

  log::debug!(
    "Reading configuration from {}",
    config_file_path.display()
  );

  let mut config_builder =
    Config::builder().set_default("base_url", DEFAULT_BASE_URL)?;

  if config_file_path.exists() {
    config_builder = config_builder.add_source(File::from(config_file_path));
  }

  config_builder
    .add_source(Environment::with_prefix("VRAC").try_parsing(true))
    .build()?
    .try_deserialize()
    .map_err(Error::ConfigError)
}

/// Load the extra root CA if the configuration points to one.
pub fn get_root_cert(
  vrac_config: &VracConfig,
) -> Result<Option<Vec<u8>>, Error> {
  match &vrac_config.root_cert_file_path {
    Some(root_cert_file_path) => {
      Ok(Some(std::fs::read(root_cert_file_path)?))
    }
    None => Ok(None),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_apply_without_configuration_file() {
    let vrac_config =
      get_configuration(Some(Path::new("/nonexistent/config.toml"))).unwrap();

    assert_eq!(vrac_config.base_url, DEFAULT_BASE_URL);
    assert!(!vrac_config.add_test_mappings);
    assert!(!vrac_config.update_prod_mappings);
    assert!(vrac_config.refresh_token.is_none());
  }
}
