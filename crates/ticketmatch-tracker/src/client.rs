//! Jira search client.

use tracing::{debug, info};

use crate::{FieldMap, SearchQuery, TicketRecord, TrackerError, TrackerResult, parse_search_response};

/// Basic auth credentials.
#[derive(Clone)]
struct Credentials {
    user: String,
    token: String,
}

/// Jira REST client for release ticket searches.
///
/// Requests are never retried: any failure is returned to the caller.
pub struct JiraClient {
    client: reqwest::Client,
    base_url: String,
    credentials: Option<Credentials>,
}

impl JiraClient {
    /// Creates a client for the Jira instance at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> TrackerResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(TrackerError::Client)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials: None,
        })
    }

    /// Authenticates requests with basic auth.
    #[must_use]
    pub fn with_credentials(mut self, user: impl Into<String>, token: impl Into<String>) -> Self {
        self.credentials = Some(Credentials {
            user: user.into(),
            token: token.into(),
        });
        self
    }

    /// Returns the instance base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches every ticket matching the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the tracker answers with a
    /// non-success status, or the response holds invalid ticket data.
    pub async fn search(
        &self,
        query: &SearchQuery,
        fields: &FieldMap,
    ) -> TrackerResult<Vec<TicketRecord>> {
        let url = format!("{}/rest/api/2/search", self.base_url);
        let body = query.request(fields);
        info!(%url, jql = %body.jql, "searching tracker");

        let mut request = self.client.post(&url).json(&body);
        if let Some(creds) = &self.credentials {
            request = request.basic_auth(&creds.user, Some(&creds.token));
        }

        let request_error = |source| TrackerError::Request {
            url: url.clone(),
            source,
        };
        let response = request.send().await.map_err(request_error)?;

        let status = response.status();
        let text = response.text().await.map_err(request_error)?;
        if !status.is_success() {
            return Err(TrackerError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        debug!(bytes = text.len(), "received search response");
        parse_search_response(&text, fields)
    }
}
