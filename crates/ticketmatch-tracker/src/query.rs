//! Search query construction and ticket deep links.

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::{TrackerError, TrackerResult};

/// Custom field ids carrying team and release note values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMap {
    /// Field holding the owning team.
    pub team: String,

    /// Field holding the release note text.
    pub release_notes: String,
}

impl Default for FieldMap {
    fn default() -> Self {
        Self {
            team: "customfield_14200".to_string(),
            release_notes: "customfield_11100".to_string(),
        }
    }
}

/// Tickets of one project carrying one fix version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Project key (e.g. `PUP`).
    pub project: String,

    /// Fix version name (e.g. `PUP 4.2.0`).
    pub fix_version: String,
}

/// Body of a `POST /rest/api/2/search` request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub jql: String,
    pub max_results: i64,
    pub fields: Vec<String>,
}

impl SearchQuery {
    /// Creates a query.
    #[must_use]
    pub fn new(project: impl Into<String>, fix_version: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            fix_version: fix_version.into(),
        }
    }

    /// Returns the JQL selecting the release's tickets ordered by key.
    #[must_use]
    pub fn jql(&self) -> String {
        format!(
            "project = {} AND fixVersion = \"{}\" ORDER BY key",
            self.project,
            self.fix_version.replace('"', "\\\"")
        )
    }

    /// Builds the request body, asking for every result and only the fields read back.
    #[must_use]
    pub fn request(&self, fields: &FieldMap) -> SearchRequest {
        SearchRequest {
            jql: self.jql(),
            max_results: -1,
            fields: vec![
                "status".to_string(),
                "issuetype".to_string(),
                fields.team.clone(),
                fields.release_notes.clone(),
            ],
        }
    }
}

/// Returns a tracker URL listing the given tickets.
///
/// # Errors
///
/// Returns an error if `base_url` is not an absolute URL.
pub fn browse_url(base_url: &str, keys: &[&str]) -> TrackerResult<String> {
    let mut url = Url::parse(base_url).map_err(|e| TrackerError::InvalidUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })?;

    let path = format!("{}/issues/", url.path().trim_end_matches('/'));
    url.set_path(&path);
    url.query_pairs_mut()
        .append_pair("jql", &format!("key in ({})", keys.join(",")));

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jql() {
        let query = SearchQuery::new("PUP", "PUP 4.2.0");
        assert_eq!(
            query.jql(),
            "project = PUP AND fixVersion = \"PUP 4.2.0\" ORDER BY key"
        );
    }

    #[test]
    fn test_jql_escapes_quotes() {
        let query = SearchQuery::new("PUP", "say \"hi\"");
        assert!(query.jql().contains("fixVersion = \"say \\\"hi\\\"\""));
    }

    #[test]
    fn test_request_body() {
        let query = SearchQuery::new("PUP", "PUP 4.2.0");
        let body = serde_json::to_value(query.request(&FieldMap::default())).unwrap();
        assert_eq!(body["maxResults"], -1);
        assert_eq!(
            body["fields"],
            serde_json::json!(["status", "issuetype", "customfield_14200", "customfield_11100"])
        );
        assert_eq!(body["jql"], query.jql());
    }

    #[test]
    fn test_browse_url() {
        let url = browse_url("https://tickets.example.com", &["PUP-1", "PUP-2"]).unwrap();
        assert_eq!(
            url,
            "https://tickets.example.com/issues/?jql=key+in+%28PUP-1%2CPUP-2%29"
        );
    }

    #[test]
    fn test_browse_url_keeps_base_path() {
        let url = browse_url("https://example.com/jira/", &["PUP-1"]).unwrap();
        assert!(url.starts_with("https://example.com/jira/issues/?jql="));
    }

    #[test]
    fn test_browse_url_invalid_base() {
        let result = browse_url("not a url", &["PUP-1"]);
        assert!(matches!(result, Err(TrackerError::InvalidUrl { .. })));
    }
}
