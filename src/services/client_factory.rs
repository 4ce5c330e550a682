use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::core::dto::AuthMethod;
use crate::core::services::transport::ReqwestTransport;
use crate::error::{NetworkError, Result};

/// Credentials available to the HTTP layer
#[derive(Clone, Default)]
pub struct Credentials {
    pub token: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

impl Credentials {
    pub fn from_config(config: &Config) -> Self {
        Self {
            token: config.token.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
        }
    }

    fn basic(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some((username, password)),
            _ => None,
        }
    }

    /// Attach the credentials the auth method asks for
    pub fn authorize(
        &self,
        builder: reqwest::RequestBuilder,
        method: AuthMethod,
    ) -> std::result::Result<reqwest::RequestBuilder, NetworkError> {
        let missing = || NetworkError::MissingCredentials {
            method: method.as_str().to_string(),
        };

        match method {
            AuthMethod::None => Ok(builder),
            AuthMethod::Token => {
                let token = self.token.as_deref().ok_or_else(missing)?;
                Ok(builder.bearer_auth(token))
            }
            AuthMethod::Basic => {
                let (username, password) = self.basic().ok_or_else(missing)?;
                Ok(builder.basic_auth(username, Some(password)))
            }
            AuthMethod::All => {
                if let Some(token) = self.token.as_deref() {
                    Ok(builder.bearer_auth(token))
                } else if let Some((username, password)) = self.basic() {
                    Ok(builder.basic_auth(username, Some(password)))
                } else {
                    Err(missing())
                }
            }
        }
    }
}

pub struct HttpClientFactory {
    config: Arc<Config>,
}

impl HttpClientFactory {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    pub fn create_http_client(&self) -> Result<reqwest::Client> {
        let client = reqwest::Client::builder()
            .user_agent(format!("tailor/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(NetworkError::Transport)?;

        Ok(client)
    }

    pub fn create_transport(&self) -> Result<ReqwestTransport> {
        Ok(ReqwestTransport::new(
            self.create_http_client()?,
            self.config.api_base_url()?,
            Credentials::from_config(&self.config),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authorized(credentials: &Credentials, method: AuthMethod) -> Option<String> {
        let builder = reqwest::Client::new().get("https://extensions.typo3.org/api/v1/extension");
        let request = credentials.authorize(builder, method).ok()?.build().unwrap();
        request
            .headers()
            .get(reqwest::header::AUTHORIZATION)
            .map(|value| value.to_str().unwrap().to_string())
    }

    fn credentials(token: Option<&str>, basic: bool) -> Credentials {
        Credentials {
            token: token.map(str::to_string),
            username: basic.then(|| "editor".to_string()),
            password: basic.then(|| "secret".to_string()),
        }
    }

    #[test]
    fn test_none_sends_no_header() {
        let request = reqwest::Client::new().get("https://extensions.typo3.org/");
        let request = credentials(Some("abc"), true)
            .authorize(request, AuthMethod::None)
            .unwrap()
            .build()
            .unwrap();
        assert!(request.headers().get(reqwest::header::AUTHORIZATION).is_none());
    }

    #[test]
    fn test_token_and_basic() {
        assert_eq!(
            authorized(&credentials(Some("abc"), false), AuthMethod::Token).as_deref(),
            Some("Bearer abc")
        );
        assert!(authorized(&credentials(None, true), AuthMethod::Token).is_none());

        let basic = authorized(&credentials(None, true), AuthMethod::Basic).unwrap();
        assert!(basic.starts_with("Basic "));
        assert!(credentials(None, false)
            .authorize(reqwest::Client::new().get("https://extensions.typo3.org/"), AuthMethod::Basic)
            .is_err());
    }

    #[test]
    fn test_all_prefers_token() {
        assert_eq!(
            authorized(&credentials(Some("abc"), true), AuthMethod::All).as_deref(),
            Some("Bearer abc")
        );
        assert!(authorized(&credentials(None, true), AuthMethod::All)
            .unwrap()
            .starts_with("Basic "));
        assert!(matches!(
            credentials(None, false)
                .authorize(reqwest::Client::new().get("https://extensions.typo3.org/"), AuthMethod::All),
            Err(NetworkError::MissingCredentials { .. })
        ));
    }

    #[test]
    fn test_debug_masks_secrets() {
        let debug = format!("{:?}", credentials(Some("abc"), true));
        assert!(!debug.contains("abc"));
        assert!(!debug.contains("secret"));
        assert!(debug.contains("editor"));
    }
}
