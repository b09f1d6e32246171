use std::path::Path;

use log::LevelFilter;
use log4rs::{
  append::{console::ConsoleAppender, file::FileAppender},
  config::{Appender, Config, Root},
  encode::pattern::PatternEncoder,
};

use crate::error::Error;

/// Configure logging to stdout and, when an audit file is given, to disk.
/// Updates to image profiles need an audit trail so the pre-update mapping
/// payloads logged by the update command survive the pipeline run.
pub fn configure(
  log_level_opt: Option<&str>,
  audit_file_path_opt: Option<&Path>,
) -> Result<log4rs::Handle, Error> {
  let log_level = match log_level_opt.unwrap_or("info").to_lowercase().as_str()
  {
    "off" => LevelFilter::Off,
    "error" => LevelFilter::Error,
    "warn" => LevelFilter::Warn,
    "info" => LevelFilter::Info,
    "debug" => LevelFilter::Debug,
    "trace" => LevelFilter::Trace,
    log_level => {
      return Err(Error::Message(format!(
        "Log level '{}' not valid",
        log_level
      )))
    }
  };

  let stdout = ConsoleAppender::builder()
    .encoder(Box::new(PatternEncoder::new(
      "{d(%Y-%m-%d %H:%M:%S)} - {h({l})} - {m}{n}",
    )))
    .build();

  let mut config_builder =
    Config::builder().appender(Appender::builder().build("stdout", Box::new(stdout)));

  let mut root_builder = Root::builder().appender("stdout");

  if let Some(audit_file_path) = audit_file_path_opt {
    let audit_file = FileAppender::builder()
      .encoder(Box::new(PatternEncoder::new(
        "{d(%Y-%m-%d %H:%M:%S)} - {l} - {m}{n}",
      )))
      .build(audit_file_path)?;

    config_builder = config_builder
      .appender(Appender::builder().build("audit", Box::new(audit_file)));
    root_builder = root_builder.appender("audit");
  }

  let config =
    config_builder
      .build(root_builder.build(log_level))
      .map_err(|e| {
        Error::Message(format!("Could not build logging configuration: {}", e))
      })?;

  log4rs::init_config(config).map_err(|e| {
    Error::Message(format!("Could not initialise logging: {}", e))
  })
}
