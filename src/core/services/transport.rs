use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::core::dto::{HttpMethod, Payload, RequestConfiguration};
use crate::error::NetworkError;
use crate::services::client_factory::Credentials;

/// Status and decoded body of a TER response
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Decode a response body; TER answers JSON, anything else is kept as text
    pub fn from_text(status: u16, text: &str) -> Self {
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
        };
        Self::new(status, body)
    }

    /// Turn a status outside the accepted codes into a rejection
    pub fn into_result(self, configuration: &RequestConfiguration) -> Result<Value, NetworkError> {
        if configuration.is_success(self.status) {
            Ok(self.body)
        } else {
            Err(NetworkError::Rejected {
                status: self.status,
                body: self.body,
            })
        }
    }
}

/// Sends one request described by a `RequestConfiguration`
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: &RequestConfiguration) -> Result<ApiResponse, NetworkError>;
}

/// Production transport on top of `reqwest`
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client, base_url: Url, credentials: Credentials) -> Self {
        Self {
            client,
            base_url,
            credentials,
        }
    }

    fn url(&self, endpoint: &str) -> Result<Url, NetworkError> {
        self.base_url
            .join(endpoint.trim_start_matches('/'))
            .map_err(|e| NetworkError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &RequestConfiguration) -> Result<ApiResponse, NetworkError> {
        let url = self.url(request.endpoint())?;
        debug!("{} {}", request.method().as_str(), url);

        let method = match request.method() {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, url);
        if !request.query().is_empty() {
            builder = builder.query(request.query());
        }
        builder = self.credentials.authorize(builder, request.auth_method())?;

        builder = match request.payload() {
            Payload::None => builder,
            Payload::Form(fields) => builder.form(fields),
            Payload::Multipart {
                fields,
                file_field,
                file,
            } => {
                let bytes = tokio::fs::read(file).await.map_err(|source| NetworkError::Upload {
                    path: file.clone(),
                    source,
                })?;
                let file_name = file
                    .file_name()
                    .map(|name| name.to_string_lossy().to_string())
                    .unwrap_or_else(|| "extension.zip".to_string());
                let part = Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str("application/zip")?;

                let form = fields
                    .iter()
                    .fold(Form::new(), |form, (name, value)| form.text(name.clone(), value.clone()))
                    .part(file_field.clone(), part);
                builder.multipart(form)
            }
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        debug!("Response status {}", status);

        Ok(ApiResponse::from_text(status, &text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_text_decodes_json() {
        let response = ApiResponse::from_text(200, r#"{"key": "news"}"#);
        assert_eq!(response.body, json!({"key": "news"}));
    }

    #[test]
    fn test_from_text_keeps_plain_text_and_empty_bodies() {
        assert_eq!(
            ApiResponse::from_text(502, "Bad Gateway").body,
            Value::String("Bad Gateway".to_string())
        );
        assert_eq!(ApiResponse::from_text(204, "  ").body, Value::Null);
    }

    #[test]
    fn test_into_result_respects_success_codes() {
        let configuration = RequestConfiguration::new(HttpMethod::Post, "extension/news")
            .with_success_codes(vec![200, 201]);

        assert!(ApiResponse::new(201, json!({})).into_result(&configuration).is_ok());

        match ApiResponse::new(403, json!({"error": "forbidden"})).into_result(&configuration) {
            Err(NetworkError::Rejected { status, body }) => {
                assert_eq!(status, 403);
                assert_eq!(body, json!({"error": "forbidden"}));
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_endpoint_is_resolved_below_api_base() {
        let transport = ReqwestTransport::new(
            reqwest::Client::new(),
            Url::parse("https://extensions.typo3.org/api/v1/").unwrap(),
            Credentials::default(),
        );
        assert_eq!(
            transport.url("/extension/news/versions").unwrap().as_str(),
            "https://extensions.typo3.org/api/v1/extension/news/versions"
        );
    }
}
