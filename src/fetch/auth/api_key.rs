use crate::fetch::client::HttpClient;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderName, HeaderValue};

/// An [`HttpClient`] wrapper that injects fixed credential headers into
/// every request.
///
/// The backend expects the project key in an `apikey` header and the
/// signed-in user's access token as `Authorization: Bearer <token>`.
pub struct ApiKey<C> {
    inner: C,
    headers: Vec<(HeaderName, HeaderValue)>,
}

impl<C> ApiKey<C> {
    /// Wraps `inner` with a single header. Fails if the name or value is
    /// not a valid HTTP header.
    pub fn new(inner: C, header_name: &str, key: &str) -> Result<Self> {
        let name = HeaderName::from_bytes(header_name.as_bytes())
            .with_context(|| format!("invalid header name '{header_name}'"))?;
        let value = HeaderValue::from_str(key)
            .with_context(|| format!("invalid value for header '{header_name}'"))?;
        Ok(Self {
            inner,
            headers: vec![(name, value)],
        })
    }

    /// Wraps `inner` with the backend's `apikey` header plus a bearer token.
    pub fn backend(inner: C, api_key: &str, access_token: &str) -> Result<Self> {
        let mut client = Self::new(inner, "apikey", api_key)?;
        let bearer = HeaderValue::from_str(&format!("Bearer {access_token}"))
            .context("invalid access token")?;
        client.headers.push((AUTHORIZATION, bearer));
        Ok(client)
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for ApiKey<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        for (name, value) in &self.headers {
            req.headers_mut().insert(name.clone(), value.clone());
        }
        self.inner.execute(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::BasicClient;

    #[test]
    fn test_rejects_invalid_header_value() {
        let result = ApiKey::new(BasicClient::new().unwrap(), "apikey", "bad\nkey");
        assert!(result.is_err());
    }

    #[test]
    fn test_backend_sets_both_headers() {
        let client = ApiKey::backend(BasicClient::new().unwrap(), "key", "token").unwrap();
        let names: Vec<_> = client.headers.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["apikey", "authorization"]);
        assert_eq!(client.headers[1].1, "Bearer token");
    }
}
