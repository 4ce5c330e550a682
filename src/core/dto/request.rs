use std::path::PathBuf;

/// Authentication strategy for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMethod {
    /// Anonymous request
    None,
    /// Username and password
    Basic,
    /// Bearer access token
    Token,
    /// Token when configured, otherwise username and password
    #[default]
    All,
}

impl AuthMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMethod::None => "none",
            AuthMethod::Basic => "basic",
            AuthMethod::Token => "token",
            AuthMethod::All => "all",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Body sent with a request
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Payload {
    #[default]
    None,
    /// `application/x-www-form-urlencoded`
    Form(Vec<(String, String)>),
    /// `multipart/form-data` with text fields and one file part
    Multipart {
        fields: Vec<(String, String)>,
        file_field: String,
        file: PathBuf,
    },
}

/// Everything needed to perform one TER API call.
///
/// Built with consuming methods and handed over to the request service by
/// value, so it cannot change once the request runs.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestConfiguration {
    method: HttpMethod,
    endpoint: String,
    query: Vec<(String, String)>,
    payload: Payload,
    raw: bool,
    auth_method: AuthMethod,
    success_codes: Vec<u16>,
}

impl RequestConfiguration {
    pub fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            query: Vec::new(),
            payload: Payload::None,
            raw: false,
            auth_method: AuthMethod::default(),
            success_codes: vec![200],
        }
    }

    pub fn with_raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    pub fn with_auth_method(mut self, auth_method: AuthMethod) -> Self {
        self.auth_method = auth_method;
        self
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_form(mut self, fields: Vec<(String, String)>) -> Self {
        self.payload = Payload::Form(fields);
        self
    }

    pub fn with_multipart_file(
        mut self,
        fields: Vec<(String, String)>,
        file_field: impl Into<String>,
        file: impl Into<PathBuf>,
    ) -> Self {
        self.payload = Payload::Multipart {
            fields,
            file_field: file_field.into(),
            file: file.into(),
        };
        self
    }

    #[cfg(test)]
    pub fn with_success_codes(mut self, codes: Vec<u16>) -> Self {
        self.success_codes = codes;
        self
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn is_raw(&self) -> bool {
        self.raw
    }

    pub fn auth_method(&self) -> AuthMethod {
        self.auth_method
    }

    pub fn is_success(&self, status: u16) -> bool {
        self.success_codes.contains(&status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RequestConfiguration::new(HttpMethod::Get, "extension/news");
        assert_eq!(config.method(), HttpMethod::Get);
        assert_eq!(config.endpoint(), "extension/news");
        assert!(!config.is_raw());
        assert_eq!(config.auth_method(), AuthMethod::All);
        assert_eq!(config.payload(), &Payload::None);
        assert!(config.is_success(200));
        assert!(!config.is_success(201));
    }

    #[test]
    fn test_chained_setters() {
        let config = RequestConfiguration::new(HttpMethod::Post, "auth/token")
            .with_form(vec![("name".to_string(), "ci".to_string())])
            .with_raw(true)
            .with_auth_method(AuthMethod::Basic)
            .with_success_codes(vec![200, 201]);

        assert!(config.is_raw());
        assert_eq!(config.auth_method(), AuthMethod::Basic);
        assert!(config.is_success(201));
        assert_eq!(
            config.payload(),
            &Payload::Form(vec![("name".to_string(), "ci".to_string())])
        );
    }
}
