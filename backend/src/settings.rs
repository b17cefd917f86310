//! Server settings loaded via OrthoConfig.
//!
//! Values layer from config files, `USERS_*` environment variables and
//! command-line flags.

use std::net::{IpAddr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{EmailPolicy, ParseEmailPolicyError};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 4000;

/// Failures raised when settings hold unusable values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// `host` is not an IP address.
    #[error("host `{host}` is not a valid IP address")]
    InvalidHost {
        /// Configured host.
        host: String,
    },
    /// `email_policy` names no known policy.
    #[error(transparent)]
    InvalidEmailPolicy(#[from] ParseEmailPolicyError),
}

/// Configuration values for the user directory server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USERS")]
pub struct DirectorySettings {
    /// Address to bind; defaults to every interface.
    pub host: Option<String>,
    /// Port to bind; defaults to 4000.
    pub port: Option<u16>,
    /// `unique` or `permissive`; defaults to `unique`.
    pub email_policy: Option<String>,
    /// Start with an empty directory instead of the seed users.
    #[ortho_config(default = false)]
    pub skip_seed: bool,
}

impl DirectorySettings {
    /// Socket address the server binds to.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidHost`] when `host` is not an IP
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST).trim();
        let ip: IpAddr = host.parse().map_err(|_| SettingsError::InvalidHost {
            host: host.to_owned(),
        })?;
        Ok(SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Duplicate email handling for the directory.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidEmailPolicy`] for unknown names.
    pub fn email_policy(&self) -> Result<EmailPolicy, SettingsError> {
        match self.email_policy.as_deref() {
            Some(raw) => Ok(raw.parse()?),
            None => Ok(EmailPolicy::default()),
        }
    }
}
