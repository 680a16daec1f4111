//! Configuration loading via `ortho-config`.

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::headers::HeaderSupport;
use crate::payload::{DEFAULT_COPY_BUFFER_SIZE, MAX_COPY_BUFFER_SIZE};

/// MIME type sent when a payload does not declare one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Payload and transport defaults derived from environment variables and
/// configuration files.
#[derive(Clone, Debug, Deserialize, OrthoConfig, PartialEq, Eq)]
#[ortho_config(
    prefix = "CLOUDPAYLOAD",
    discovery(
        app_name = "cloudpayload",
        env_var = "CLOUDPAYLOAD_CONFIG_PATH",
        config_file_name = "cloudpayload.toml",
        dotfile_name = ".cloudpayload.toml",
        project_file_name = "cloudpayload.toml"
    )
)]
pub struct PayloadConfig {
    /// Content type used for the `Content-Type` header when a payload leaves
    /// it unset.
    #[ortho_config(default = DEFAULT_CONTENT_TYPE.to_owned())]
    pub default_content_type: String,
    /// Chunk size in bytes used when pushing payload content into a sink.
    #[ortho_config(default = DEFAULT_COPY_BUFFER_SIZE)]
    pub copy_buffer_size: usize,
    /// Whether the target provider accepts `Content-MD5`. Unset means yes.
    pub send_content_md5: Option<bool>,
    /// Whether the target provider accepts `Content-Disposition`. Unset
    /// means yes.
    pub send_content_disposition: Option<bool>,
    /// Whether the target provider accepts `Content-Language`. Unset means
    /// yes.
    pub send_content_language: Option<bool>,
    /// Whether the target provider accepts `Content-Encoding`. Unset means
    /// yes.
    pub send_content_encoding: Option<bool>,
}

impl Default for PayloadConfig {
    fn default() -> Self {
        Self {
            default_content_type: DEFAULT_CONTENT_TYPE.to_owned(),
            copy_buffer_size: DEFAULT_COPY_BUFFER_SIZE,
            send_content_md5: None,
            send_content_disposition: None,
            send_content_language: None,
            send_content_encoding: None,
        }
    }
}

impl PayloadConfig {
    /// Loads configuration without attempting to parse CLI arguments. Values
    /// merge defaults, configuration files, and environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the merge fails.
    pub fn load_without_cli_args() -> Result<Self, ConfigError> {
        Self::load_from_iter([std::ffi::OsString::from("cloudpayload")])
            .map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Loads and validates configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load_without_cli_args()?;
        config.validate()?;
        Ok(config)
    }

    /// Performs semantic validation. Error messages name the environment
    /// variable and TOML key that supply each value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when the default content type is
    /// blank and [`ConfigError::Invalid`] when the buffer size is zero or
    /// above [`MAX_COPY_BUFFER_SIZE`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_content_type.trim().is_empty() {
            return Err(ConfigError::MissingField(String::from(
                "missing default content type: set CLOUDPAYLOAD_DEFAULT_CONTENT_TYPE or add \
                 default_content_type to cloudpayload.toml",
            )));
        }
        if self.copy_buffer_size == 0 {
            return Err(ConfigError::Invalid(String::from(
                "copy buffer size must be greater than zero: check \
                 CLOUDPAYLOAD_COPY_BUFFER_SIZE or copy_buffer_size in cloudpayload.toml",
            )));
        }
        if self.copy_buffer_size > MAX_COPY_BUFFER_SIZE {
            return Err(ConfigError::Invalid(format!(
                "copy buffer size must not exceed {MAX_COPY_BUFFER_SIZE} bytes: check \
                 CLOUDPAYLOAD_COPY_BUFFER_SIZE or copy_buffer_size in cloudpayload.toml",
            )));
        }
        Ok(())
    }

    /// Returns the optional headers the configured provider accepts. Unset
    /// toggles count as accepted.
    #[must_use]
    pub const fn header_support(&self) -> HeaderSupport {
        HeaderSupport {
            content_md5: enabled(self.send_content_md5),
            content_disposition: enabled(self.send_content_disposition),
            content_language: enabled(self.send_content_language),
            content_encoding: enabled(self.send_content_encoding),
        }
    }
}

const fn enabled(toggle: Option<bool>) -> bool {
    matches!(toggle, None | Some(true))
}

/// Errors raised during configuration loading and validation.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    /// Indicates a required configuration field is empty or missing.
    #[error("missing configuration field: {0}")]
    MissingField(String),
    /// Indicates a configuration value is present but unusable.
    #[error("invalid configuration value: {0}")]
    Invalid(String),
    /// Surfaces errors from the `ortho-config` loader.
    #[error("configuration parsing failed: {0}")]
    Parse(String),
}

impl From<ortho_config::OrthoError> for ConfigError {
    fn from(value: ortho_config::OrthoError) -> Self {
        Self::Parse(value.to_string())
    }
}
