use super::definitions::RequestSpec;
use crate::error::ClientError;
use crate::models::ErrorResponse;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    root: String,
}

impl HttpClient {
    pub fn new(root: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            root: root.into(),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.root.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn add_auth_header(&self, request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a request and return the decoded JSON body (`Null` when empty)
    pub async fn execute(
        &self,
        spec: &RequestSpec,
        token: Option<&str>,
    ) -> Result<Value, ClientError> {
        let url = self.url(&spec.path);
        tracing::debug!("{} {}", spec.method, spec.url_path());

        let mut request = self.client.request(spec.method.as_reqwest(), &url);
        if !spec.query.is_empty() {
            request = request.query(&spec.query);
        }
        request = self.add_auth_header(request, token);
        if let Some(body) = &spec.body {
            request = request.json(body);
        }

        let response = request.send().await?;
        self.handle_response(response).await
    }

    async fn handle_response(&self, response: reqwest::Response) -> Result<Value, ClientError> {
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            return Ok(serde_json::from_str(&text)?);
        }

        let message = error_message(&text);
        tracing::debug!("HTTP {} error: {}", status, message);

        match status {
            StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized(message)),
            StatusCode::FORBIDDEN => Err(ClientError::Forbidden(message)),
            StatusCode::NOT_FOUND => Err(ClientError::NotFound),
            StatusCode::CONFLICT => Err(ClientError::Conflict(message)),
            _ => Err(ClientError::Status {
                status: status.as_u16(),
                message,
            }),
        }
    }
}

fn error_message(text: &str) -> String {
    serde_json::from_str::<ErrorResponse>(text)
        .ok()
        .and_then(ErrorResponse::into_message)
        .unwrap_or_else(|| text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_unwraps_json_bodies() {
        assert_eq!(error_message(r#"{"error":"Email taken"}"#), "Email taken");
        assert_eq!(error_message(r#"{"message":"Bad input"}"#), "Bad input");
        assert_eq!(error_message(" plain text \n"), "plain text");
        assert_eq!(error_message(r#"{"other":1}"#), r#"{"other":1}"#);
    }

    #[test]
    fn url_joins_root_and_path() {
        let client = HttpClient::new("http://localhost:5016/v1/", Duration::from_secs(1));
        assert_eq!(client.url("/posts/1"), "http://localhost:5016/v1/posts/1");
        assert_eq!(client.url("account"), "http://localhost:5016/v1/account");
    }
}
