// Import necessary crates and modules
use crate::error::ConfigError;
use keyring::Entry;
use log::info;
use serde::{Deserialize, Serialize};

pub const ENV_URL: &str = "CANVAS_URL";
pub const ENV_TOKEN: &str = "CANVAS_TOKEN";
pub const ENV_LINK_URL: &str = "CANVAS_LINK_URL";

const KEYRING_URL: &str = "URL_CANVAS";
const KEYRING_TOKEN: &str = "TOKEN_CANVAS";
const KEYRING_LINK_URL: &str = "LINK_URL_CANVAS";

/// Structure to hold Canvas API credentials.
///
/// Fields:
/// - `url_canvas`: Base URL for the Canvas API (e.g. `https://canvas.example.com/api/v1`).
/// - `token_canvas`: API token for authentication.
/// - `url_links`: Human facing base URL used to build clickable links in reports.
///
/// Example usage:
/// ```
/// use canvas_rubric_analyzer::CanvasCredentials;
///
/// let canvas_credentials = CanvasCredentials {
///     url_canvas: "https://canvas.example.com/api/v1".to_string(),
///     token_canvas: "your_api_token".to_string(),
///     url_links: "https://canvas.example.com".to_string(),
/// };
/// assert!(canvas_credentials.validate().is_ok());
/// ```
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct CanvasCredentials {
    pub url_canvas: String,
    #[serde(skip_serializing, default)]
    pub token_canvas: String,
    pub url_links: String,
}

impl CanvasCredentials {
    /// Builds credentials from any key/value source, trimming trailing slashes
    /// from both URLs so endpoints can be appended directly.
    pub fn from_lookup<F>(lookup: F) -> Result<CanvasCredentials, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let url_canvas = read(ENV_URL).ok_or(ConfigError::MissingBaseUrl)?;
        let token_canvas = read(ENV_TOKEN).ok_or(ConfigError::MissingToken)?;
        let url_links = read(ENV_LINK_URL).ok_or(ConfigError::MissingLinkUrl)?;

        Ok(CanvasCredentials {
            url_canvas: url_canvas.trim_end_matches('/').to_string(),
            token_canvas,
            url_links: url_links.trim_end_matches('/').to_string(),
        })
    }

    /// Loads the credentials from `CANVAS_URL`, `CANVAS_TOKEN` and `CANVAS_LINK_URL`.
    pub fn load_credentials_from_env() -> Result<CanvasCredentials, ConfigError> {
        let credentials = Self::from_lookup(|key| std::env::var(key).ok())?;
        info!("Credentials loaded from environment! -> {}", credentials.url_canvas);
        Ok(credentials)
    }

    /// Loads Canvas credentials from the system's keyring.
    ///
    /// Entries live under the service named after this crate.
    pub fn load_credentials_from_system() -> Result<CanvasCredentials, ConfigError> {
        let app_name = env!("CARGO_PKG_NAME");
        let read = |key: &str| -> Result<String, ConfigError> {
            Entry::new(app_name, key)
                .and_then(|entry| entry.get_password())
                .map_err(|_| ConfigError::Keyring(key.to_string()))
        };

        let url = read(KEYRING_URL)?;
        let token = read(KEYRING_TOKEN)?;
        let link_url = read(KEYRING_LINK_URL)?;

        Self::from_lookup(|key| match key {
            ENV_URL => Some(url.clone()),
            ENV_TOKEN => Some(token.clone()),
            ENV_LINK_URL => Some(link_url.clone()),
            _ => None,
        })
    }

    /// Loads the credentials, attempting first from environment variables, then from the system's keyring.
    ///
    /// When both sources fail the environment error is returned, since that
    /// is the source most users configure.
    pub fn credentials() -> Result<CanvasCredentials, ConfigError> {
        match Self::load_credentials_from_env() {
            Ok(credentials) => Ok(credentials),
            Err(env_error) => match Self::load_credentials_from_system() {
                Ok(credentials) => {
                    info!("Credentials loaded from system keyring");
                    Ok(credentials)
                }
                Err(_) => Err(env_error),
            },
        }
    }

    /// Checks that every field needed by the client is present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url_canvas.trim().is_empty() {
            return Err(ConfigError::MissingBaseUrl);
        }
        if self.token_canvas.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }
        if self.url_links.trim().is_empty() {
            return Err(ConfigError::MissingLinkUrl);
        }
        Ok(())
    }
}
