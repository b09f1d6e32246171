use std::{env::VarError, io, str::Utf8Error};

use globset::Error as GlobsetError;
use serde_json::Value;

#[derive(thiserror::Error, Debug)]
pub enum Error {
  #[error("VRAC-RS > Generic error: {0}")]
  Message(String),
  #[error("VRAC-RS > Environment variable: {0}")]
  EnvVarError(#[from] VarError),
  #[error("VRAC-RS > IO: {0}")]
  IoError(#[from] io::Error),
  #[error("VRAC-RS > Serde JSON: {0}")]
  SerdeJsonError(#[from] serde_json::Error),
  #[error("VRAC-RS > Net: {0}")]
  NetError(#[from] reqwest::Error),
  #[error("VRAC-RS > Config: {0}")]
  ConfigError(#[from] config::ConfigError),
  #[error("VRAC-RS > Error converting from UTF8 to String: {0}")]
  UtfError(#[from] Utf8Error),
  #[error("VRAC-RS > Glob error: {0}")]
  GlobError(#[from] GlobsetError),
  #[error("http request:\nresponse: {response}\npayload: {payload}")]
  RequestError {
    response: reqwest::Error,
    payload: String, // NOTE: the IaaS API returns either plain text or a json therefore, we
                     // will just return a String
  },
  #[error("VRAC-RS > vRA: {}", .0.get("message").and_then(|message| message.as_str()).unwrap_or("Unknown error"))]
  VracError(Value),
  #[error("VRAC-RS > Image profile '{0}' not found")]
  ImageProfileNotFound(String),
  #[error("VRAC-RS > Image profile '{0}' does not have a region link defined")]
  ImageProfileRegionLinkNotDefined(String),
  #[error("VRAC-RS > Fabric image '{0}' does not follow the 'vendor-version' naming convention")]
  ImageNameNotValid(String),
  #[error("VRAC-RS > Claim '{0}' not found in API auth token")]
  TokenClaimNotFound(String),
}
