//! HTTP client for the answer service.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use super::{Answer, AnswerService, QueryError, QueryRequest};

/// reqwest-backed [`AnswerService`].
///
/// # Example
///
/// ```rust,no_run
/// use docs_chat_widget::backend::{AnswerService, QueryClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = QueryClient::new("http://localhost:8000/api/query-global", None)?;
/// let answer = client.query("What is chapter 3 about?").await?;
/// println!("{:?}", answer.text);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct QueryClient {
    endpoint: Url,
    http: reqwest::Client,
}

impl QueryClient {
    /// Create a client posting to `endpoint`.
    ///
    /// `timeout` bounds the whole request at the transport level; `None`
    /// leaves reqwest's defaults in place.
    pub fn new(endpoint: impl AsRef<str>, timeout: Option<Duration>) -> Result<Self, QueryError> {
        let endpoint = Url::parse(endpoint.as_ref())?;
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            endpoint,
            http: builder.build()?,
        })
    }

    /// Create a client from a base URL and a path.
    ///
    /// The two are joined by plain concatenation, without normalizing
    /// separators, so the request goes exactly where the configuration says.
    pub fn from_parts(
        base_url: &str,
        query_path: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, QueryError> {
        Self::new(format!("{base_url}{query_path}"), timeout)
    }

    /// The URL queries are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Pull the `answer` string out of a decoded response body.
///
/// Anything other than a JSON string under `answer` counts as "no answer".
fn extract_answer(body: &Value) -> Answer {
    Answer {
        text: body
            .get("answer")
            .and_then(Value::as_str)
            .map(ToOwned::to_owned),
    }
}

#[async_trait]
impl AnswerService for QueryClient {
    async fn query(&self, text: &str) -> Result<Answer, QueryError> {
        tracing::debug!(endpoint = %self.endpoint, "Posting query to answer service");

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&QueryRequest::new(text))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".into());
            return Err(QueryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let body: Value = serde_json::from_slice(&bytes)?;
        Ok(extract_answer(&body))
    }
}
