//! The HTTP seam: a [`Transport`] trait and its `reqwest` implementation.

use std::future::Future;
use std::time::Duration;

use gafeed_core::ClientConfig;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;

use crate::error::ClientError;

/// Status and body of a completed exchange, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Performs one authenticated GET against the service.
///
/// Implementations return `Ok` for every completed exchange, including
/// non-200 statuses; [`crate::classify::classify`] interprets those. `Err`
/// is reserved for failures to complete the exchange at all.
pub trait Transport {
    fn fetch(
        &self,
        path_and_query: &str,
    ) -> impl Future<Output = Result<RawResponse, ClientError>> + Send;
}

/// [`Transport`] over `reqwest`.
///
/// Sends `Authorization: GoogleLogin auth=<token>` and `GData-Version: 2`
/// with every request. Replacing the token with [`HttpTransport::set_token`]
/// affects all later requests.
#[derive(Debug)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    authorization: HeaderValue,
}

impl HttpTransport {
    /// Builds a transport from the configured timeout, user agent, proxy,
    /// and certificate policy.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidAuthToken`] if the token cannot be sent
    /// as a header, and [`ClientError::Http`] if the proxy URL is invalid or
    /// the underlying `reqwest::Client` cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(config.user_agent.as_str())
            .danger_accept_invalid_certs(!config.verify_ssl);
        if let Some(proxy) = &config.http_proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy.as_str())?);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            authorization: authorization_header(&config.token)?,
        })
    }

    /// Replaces the token sent with every later request.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidAuthToken`] if the token cannot be sent
    /// as a header; the previous token stays in use.
    pub fn set_token(&mut self, token: &str) -> Result<(), ClientError> {
        self.authorization = authorization_header(token)?;
        Ok(())
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, self.authorization.clone());
        headers.insert("GData-Version", HeaderValue::from_static("2"));
        headers
    }
}

fn authorization_header(token: &str) -> Result<HeaderValue, ClientError> {
    let mut value = HeaderValue::from_str(&format!("GoogleLogin auth={token}"))
        .map_err(|_| ClientError::InvalidAuthToken)?;
    value.set_sensitive(true);
    Ok(value)
}

impl Transport for HttpTransport {
    fn fetch(
        &self,
        path_and_query: &str,
    ) -> impl Future<Output = Result<RawResponse, ClientError>> + Send {
        let url = format!("{}{path_and_query}", self.base_url);
        let request = self.client.get(url).headers(self.auth_headers());
        async move {
            let response = request.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(RawResponse { status, body })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(token: &str) -> ClientConfig {
        ClientConfig {
            token: token.to_owned(),
            profile_id: None,
            api_key: None,
            base_url: "http://localhost:9/".to_owned(),
            timeout_secs: 5,
            verify_ssl: true,
            http_proxy: None,
            user_agent: "gafeed-test".to_owned(),
            log_level: "info".to_owned(),
        }
    }

    #[test]
    fn token_becomes_sensitive_authorization_header() {
        let transport = HttpTransport::new(&config("abc123")).unwrap();
        let headers = transport.auth_headers();
        let auth = &headers[AUTHORIZATION];
        assert_eq!(auth, "GoogleLogin auth=abc123");
        assert!(auth.is_sensitive());
        assert_eq!(headers["GData-Version"], "2");
        assert_eq!(transport.base_url(), "http://localhost:9");
    }

    #[test]
    fn token_with_control_characters_is_rejected() {
        assert!(matches!(
            HttpTransport::new(&config("abc\r\nX-Injected: 1")),
            Err(ClientError::InvalidAuthToken)
        ));
    }

    #[test]
    fn rejected_replacement_keeps_previous_token() {
        let mut transport = HttpTransport::new(&config("first")).unwrap();
        assert!(matches!(
            transport.set_token("bad\ntoken"),
            Err(ClientError::InvalidAuthToken)
        ));
        assert_eq!(transport.auth_headers()[AUTHORIZATION], "GoogleLogin auth=first");

        transport.set_token("second").unwrap();
        assert_eq!(transport.auth_headers()[AUTHORIZATION], "GoogleLogin auth=second");
    }
}
