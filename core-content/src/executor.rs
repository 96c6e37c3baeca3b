//! HTTP Request Executor
//!
//! Builds a request from a [`RequestSpec`], attaches the bearer token when one
//! is supplied and drives the call under the caller's [`CancellationScope`].
//! Only 2xx responses come back as `Ok`; everything else is a
//! [`RequestFailure`] for the classifier. There is no retry and no timeout
//! beyond the transport's own unless one is configured.

use bridge_traits::{HttpClient, HttpMethod, HttpRequest, HttpResponse, MultipartForm};
use core_auth::SessionToken;
use core_runtime::logging::redact_if_sensitive;
use core_runtime::CancellationScope;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::error::RequestFailure;

/// Body of an outgoing request
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(MultipartForm),
}

/// What to send, relative to the API base
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub method: HttpMethod,
    /// Path starting with `/`, e.g. `/api/links/5`
    pub path: String,
    pub body: RequestBody,
}

impl RequestSpec {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: RequestBody::Empty,
        }
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }
}

#[derive(Clone)]
pub struct RequestExecutor {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    timeout: Option<Duration>,
}

impl RequestExecutor {
    pub fn new(http_client: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn build_request(
        &self,
        spec: RequestSpec,
        token: Option<&SessionToken>,
    ) -> Result<HttpRequest, RequestFailure> {
        let mut request = HttpRequest::new(spec.method, self.url_for(&spec.path))
            .header("Accept", "application/json");

        if let Some(token) = token {
            request = request.bearer_token(token.expose());
        }

        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        match spec.body {
            RequestBody::Empty => Ok(request),
            RequestBody::Json(value) => request
                .json(&value)
                .map_err(|e| RequestFailure::other(e.to_string())),
            RequestBody::Multipart(form) => Ok(request.multipart(form)),
        }
    }

    /// Execute one request.
    ///
    /// Resolves to [`RequestFailure::Cancelled`] if `scope` is cancelled
    /// before the call starts, while it is in flight, or by the time the
    /// response arrives.
    pub async fn execute(
        &self,
        spec: RequestSpec,
        token: Option<&SessionToken>,
        scope: &CancellationScope,
    ) -> Result<HttpResponse, RequestFailure> {
        if scope.is_cancelled() {
            debug!("Scope already cancelled, not sending request");
            return Err(RequestFailure::Cancelled);
        }

        let method = spec.method;
        let request = self.build_request(spec, token)?;
        let authorization = request
            .headers
            .get("Authorization")
            .map(|value| redact_if_sensitive("Authorization", value))
            .unwrap_or_default();
        debug!(
            method = method.as_str(),
            url = %request.url,
            authorization = %authorization,
            "Sending request"
        );

        let response = match scope.run(self.http_client.execute(request)).await {
            None => {
                debug!(method = method.as_str(), "Request cancelled in flight");
                return Err(RequestFailure::Cancelled);
            }
            Some(Err(e)) if e.is_network() => {
                return Err(RequestFailure::Transport {
                    message: e.to_string(),
                })
            }
            Some(Err(e)) => return Err(RequestFailure::other(e.to_string())),
            Some(Ok(response)) => response,
        };

        debug!(
            method = method.as_str(),
            status = response.status,
            bytes = response.body.len(),
            "Response received"
        );

        if response.is_success() {
            Ok(response)
        } else {
            Err(RequestFailure::Status {
                status: response.status,
                body: response.body,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::error::{BridgeError, Result as BridgeResult};
    use bridge_traits::{FilePart, HttpBody};
    use mockall::mock;

    mock! {
        HttpClient {}

        #[async_trait]
        impl HttpClient for HttpClient {
            async fn execute(&self, request: HttpRequest) -> BridgeResult<HttpResponse>;
        }
    }

    fn executor(mock: MockHttpClient) -> RequestExecutor {
        RequestExecutor::new(Arc::new(mock), "http://localhost:5000/")
    }

    fn token() -> SessionToken {
        SessionToken::new("abc").unwrap()
    }

    #[tokio::test]
    async fn test_bearer_attached_when_token_present() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .withf(|req: &HttpRequest| {
                req.url == "http://localhost:5000/api/links"
                    && req.method == HttpMethod::Get
                    && req.headers.get("Authorization") == Some(&"Bearer abc".to_string())
            })
            .times(1)
            .returning(|_| Ok(HttpResponse::new(200, "[]")));

        let response = executor(mock)
            .execute(
                RequestSpec::new(HttpMethod::Get, "/api/links"),
                Some(&token()),
                &CancellationScope::new(),
            )
            .await
            .unwrap();
        assert_eq!(response.status, 200);
    }

    #[tokio::test]
    async fn test_no_header_without_token() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .withf(|req: &HttpRequest| !req.has_authorization())
            .times(1)
            .returning(|_| Ok(HttpResponse::new(200, "[]")));

        executor(mock)
            .execute(
                RequestSpec::new(HttpMethod::Get, "/api/links"),
                None,
                &CancellationScope::new(),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_json_and_multipart_bodies() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .withf(|req: &HttpRequest| {
                matches!(req.body, Some(HttpBody::Bytes(_)))
                    && req.headers.get("Content-Type") == Some(&"application/json".to_string())
            })
            .times(1)
            .returning(|_| Ok(HttpResponse::new(200, "{}")));
        mock.expect_execute()
            .withf(|req: &HttpRequest| {
                matches!(&req.body, Some(HttpBody::Multipart(form)) if form.has_files())
            })
            .times(1)
            .returning(|_| Ok(HttpResponse::new(201, "{}")));

        let executor = executor(mock);
        let scope = CancellationScope::new();

        executor
            .execute(
                RequestSpec::new(HttpMethod::Put, "/api/counter/1")
                    .with_body(RequestBody::Json(serde_json::json!({ "years": 10 }))),
                Some(&token()),
                &scope,
            )
            .await
            .unwrap();

        let form = MultipartForm::new()
            .text("title", "x")
            .file("image", FilePart::new("a.png", "image/png", vec![0u8; 4]));
        executor
            .execute(
                RequestSpec::new(HttpMethod::Post, "/api/projects")
                    .with_body(RequestBody::Multipart(form)),
                Some(&token()),
                &scope,
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_non_success_status_is_failure() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .times(1)
            .returning(|_| Ok(HttpResponse::new(422, r#"{"error":"title required"}"#)));

        let err = executor(mock)
            .execute(
                RequestSpec::new(HttpMethod::Post, "/api/projects"),
                Some(&token()),
                &CancellationScope::new(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(422));
    }

    #[tokio::test]
    async fn test_transport_errors() {
        let scope = CancellationScope::new();
        let spec = RequestSpec::new(HttpMethod::Get, "/api/links");

        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .times(1)
            .returning(|_| Err(BridgeError::Network("connection refused".to_string())));
        assert!(matches!(
            executor(mock).execute(spec.clone(), None, &scope).await,
            Err(RequestFailure::Transport { .. })
        ));

        let mut mock = MockHttpClient::new();
        mock.expect_execute()
            .times(1)
            .returning(|_| Err(BridgeError::OperationFailed("bad header".to_string())));
        assert!(matches!(
            executor(mock).execute(spec, None, &scope).await,
            Err(RequestFailure::Other { .. })
        ));
    }

    #[tokio::test]
    async fn test_cancelled_scope_sends_nothing() {
        let mut mock = MockHttpClient::new();
        mock.expect_execute().times(0);

        let scope = CancellationScope::new();
        scope.cancel();

        let result = executor(mock)
            .execute(
                RequestSpec::new(HttpMethod::Get, "/api/links"),
                Some(&token()),
                &scope,
            )
            .await;
        assert_eq!(result.unwrap_err(), RequestFailure::Cancelled);
    }

    #[test]
    fn test_timeout_is_forwarded() {
        let executor = executor(MockHttpClient::new()).with_timeout(Some(Duration::from_secs(5)));
        let request = executor
            .build_request(RequestSpec::new(HttpMethod::Delete, "api/links/5"), None)
            .unwrap();
        assert_eq!(request.timeout, Some(Duration::from_secs(5)));
        assert_eq!(request.url, "http://localhost:5000/api/links/5");
    }
}
