//! GraphQL transport for the admin console.
//!
//! A single-endpoint POST client: every call carries a bearer token, and every
//! failure collapses into one [`TransportError`] so callers have exactly one
//! error-handling path regardless of whether the request died on the wire,
//! was rejected by the GraphQL layer, or came back without a payload.

mod error;

pub use error::TransportError;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

pub type Result<T> = std::result::Result<T, TransportError>;

#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub endpoint: String,
    pub bearer_token: String,
}

impl TransportConfig {
    pub fn from_env() -> Self {
        Self {
            endpoint: std::env::var("ADMIN_API_ENDPOINT")
                .unwrap_or_else(|_| "http://localhost:4000/graphql".to_string()),
            bearer_token: std::env::var("ADMIN_API_TOKEN").unwrap_or_default(),
        }
    }
}

#[derive(Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
    variables: &'a Value,
}

/// Client for a single GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    http: reqwest::Client,
    endpoint: String,
    bearer_token: String,
}

impl GraphqlClient {
    /// A missing bearer token is a fatal precondition: construction fails
    /// before any request can be attempted.
    pub fn new(config: TransportConfig) -> Result<Self> {
        if config.bearer_token.trim().is_empty() {
            return Err(TransportError::MissingToken);
        }

        Ok(Self {
            http: reqwest::Client::new(),
            endpoint: config.endpoint,
            bearer_token: config.bearer_token,
        })
    }

    /// Execute one query or mutation document and return the `data` payload.
    ///
    /// No retries and no timeout are applied here; callers retry manually.
    pub async fn execute(&self, document: &str, variables: Value) -> Result<Value> {
        let request = GraphqlRequest {
            query: document,
            variables: &variables,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.bearer_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| TransportError::network(format!("Network error: {e}")))?;

        let status = response.status().as_u16();
        debug!(endpoint = %self.endpoint, status, "GraphQL response received");

        // A body that is not JSON decodes to Null and falls through to the
        // status-based fallbacks below.
        let body: Value = response.json().await.unwrap_or(Value::Null);
        decode_response(status, body)
    }
}

/// Map an HTTP status and GraphQL response body onto the error taxonomy.
///
/// Precedence: an explicit GraphQL error list wins over the HTTP status, the
/// status wins over a missing payload, and a 2xx response must carry data.
pub fn decode_response(status: u16, body: Value) -> Result<Value> {
    if let Some(message) = first_error_message(&body) {
        return Err(TransportError::Request { status, message });
    }

    if !(200..300).contains(&status) {
        return Err(TransportError::Request {
            status,
            message: format!("Request failed with status {status}"),
        });
    }

    match body.get("data") {
        Some(data) if !data.is_null() => Ok(data.clone()),
        _ => Err(TransportError::EmptyData),
    }
}

fn first_error_message(body: &Value) -> Option<String> {
    let errors = body.get("errors")?.as_array()?;
    let first = errors.first()?;
    Some(
        first
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| "Request failed".to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn client_requires_bearer_token() {
        let err = GraphqlClient::new(TransportConfig {
            endpoint: "http://localhost:4000/graphql".into(),
            bearer_token: "  ".into(),
        })
        .unwrap_err();
        assert!(matches!(err, TransportError::MissingToken));
    }

    #[test]
    fn graphql_errors_surface_first_message() {
        let body = json!({
            "data": null,
            "errors": [
                { "message": "Organization not found" },
                { "message": "second error ignored" }
            ]
        });
        let err = decode_response(200, body).unwrap_err();
        match err {
            TransportError::Request { status, message } => {
                assert_eq!(status, 200);
                assert_eq!(message, "Organization not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn malformed_error_entry_gets_fallback_message() {
        let body = json!({ "errors": [ { "code": 42 } ] });
        let err = decode_response(200, body).unwrap_err();
        match err {
            TransportError::Request { message, .. } => {
                assert_eq!(message, "Request failed");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_2xx_without_errors_uses_status_fallback() {
        let err = decode_response(502, Value::Null).unwrap_err();
        match err {
            TransportError::Request { status, message } => {
                assert_eq!(status, 502);
                assert!(message.contains("502"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn success_without_data_is_an_error() {
        let err = decode_response(200, json!({ "data": null })).unwrap_err();
        assert!(matches!(err, TransportError::EmptyData));
    }

    #[test]
    fn success_returns_data_payload() {
        let body = json!({ "data": { "organizations": { "totalCount": 0, "items": [] } } });
        let data = decode_response(200, body).unwrap();
        assert_eq!(data["organizations"]["totalCount"], 0);
    }

    #[test]
    fn network_errors_carry_status_zero() {
        let err = TransportError::network("Network error: connection refused");
        match err {
            TransportError::Request { status, .. } => assert_eq!(status, 0),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
