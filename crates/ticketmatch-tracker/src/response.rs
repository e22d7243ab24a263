//! Jira search response ingestion.

use serde_json::Value;
use tracing::debug;

use crate::{FieldMap, TicketRecord, TrackerError, TrackerResult};

/// Parses a search response body into ticket records, in response order.
///
/// A response without issues is an empty release, not an error.
///
/// # Errors
///
/// Returns [`TrackerError::InvalidResponse`] if the body is not JSON and
/// [`TrackerError::InvalidTicketData`] if an issue lacks its key, status or
/// issue type.
pub fn parse_search_response(body: &str, fields: &FieldMap) -> TrackerResult<Vec<TicketRecord>> {
    let response: Value = serde_json::from_str(body)?;

    let Some(issues) = response.get("issues").filter(|v| !v.is_null()) else {
        debug!("search response has no issues");
        return Ok(Vec::new());
    };
    let issues = issues.as_array().ok_or_else(|| TrackerError::InvalidTicketData {
        index: 0,
        reason: "`issues` is not an array".to_string(),
    })?;

    let tickets = issues
        .iter()
        .enumerate()
        .map(|(index, issue)| parse_issue(index, issue, fields))
        .collect::<TrackerResult<Vec<_>>>()?;

    debug!(count = tickets.len(), "parsed tickets from search response");
    Ok(tickets)
}

fn parse_issue(index: usize, issue: &Value, fields: &FieldMap) -> TrackerResult<TicketRecord> {
    let invalid = |reason: &str| TrackerError::InvalidTicketData {
        index,
        reason: reason.to_string(),
    };

    let key = issue
        .get("key")
        .and_then(Value::as_str)
        .ok_or_else(|| invalid("missing key"))?;
    let issue_fields = issue
        .get("fields")
        .ok_or_else(|| invalid(&format!("{key}: missing fields")))?;
    let state = named(issue_fields.get("status"))
        .ok_or_else(|| invalid(&format!("{key}: missing status name")))?;
    let issue_type = named(issue_fields.get("issuetype"))
        .ok_or_else(|| invalid(&format!("{key}: missing issue type name")))?;

    let mut ticket = TicketRecord::new(key, state, issue_type);
    ticket.team = issue_fields.get(&fields.team).and_then(option_label);
    ticket.release_note = issue_fields
        .get(&fields.release_notes)
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(ticket)
}

/// Reads `{"name": "..."}`.
fn named(value: Option<&Value>) -> Option<&str> {
    value?.get("name")?.as_str()
}

/// Reads a select-list style value: a plain string or `{"value"|"name": "..."}`.
fn option_label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => map
            .get("value")
            .or_else(|| map.get("name"))
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> TrackerResult<Vec<TicketRecord>> {
        parse_search_response(body, &FieldMap::default())
    }

    #[test]
    fn test_parse_full_issue() {
        let body = r#"{
            "issues": [{
                "key": "PUP-1",
                "fields": {
                    "status": {"name": "Resolved"},
                    "issuetype": {"name": "Bug"},
                    "customfield_14200": {"value": "Platform"},
                    "customfield_11100": "Fixed a crash"
                }
            }]
        }"#;

        let tickets = parse(body).unwrap();
        assert_eq!(
            tickets,
            vec![
                TicketRecord::new("PUP-1", "Resolved", "Bug")
                    .with_team("Platform")
                    .with_release_note("Fixed a crash")
            ]
        );
    }

    #[test]
    fn test_parse_optional_fields_absent_or_null() {
        let body = r#"{
            "issues": [
                {"key": "PUP-1", "fields": {"status": {"name": "Open"}, "issuetype": {"name": "Epic"}}},
                {"key": "PUP-2", "fields": {
                    "status": {"name": "Open"}, "issuetype": {"name": "Task"},
                    "customfield_14200": null, "customfield_11100": null
                }}
            ]
        }"#;

        let tickets = parse(body).unwrap();
        assert_eq!(tickets.len(), 2);
        assert!(tickets.iter().all(|t| t.team.is_none()));
        assert!(tickets.iter().all(|t| t.release_note.is_none()));
    }

    #[test]
    fn test_parse_team_as_string() {
        let body = r#"{"issues": [{"key": "PUP-1", "fields": {
            "status": {"name": "Open"}, "issuetype": {"name": "Bug"},
            "customfield_14200": "Agent"
        }}]}"#;

        let tickets = parse(body).unwrap();
        assert_eq!(tickets[0].team.as_deref(), Some("Agent"));
    }

    #[test]
    fn test_parse_preserves_order() {
        let body = r#"{"issues": [
            {"key": "PUP-9", "fields": {"status": {"name": "Open"}, "issuetype": {"name": "Bug"}}},
            {"key": "PUP-10", "fields": {"status": {"name": "Open"}, "issuetype": {"name": "Bug"}}}
        ]}"#;

        let keys: Vec<_> = parse(body).unwrap().into_iter().map(|t| t.key).collect();
        assert_eq!(keys, vec!["PUP-9", "PUP-10"]);
    }

    #[test]
    fn test_parse_no_issues() {
        assert!(parse("{}").unwrap().is_empty());
        assert!(parse(r#"{"issues": null}"#).unwrap().is_empty());
        assert!(parse(r#"{"issues": []}"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_missing_key() {
        let body = r#"{"issues": [
            {"key": "PUP-1", "fields": {"status": {"name": "Open"}, "issuetype": {"name": "Bug"}}},
            {"fields": {"status": {"name": "Open"}, "issuetype": {"name": "Bug"}}}
        ]}"#;

        match parse(body) {
            Err(TrackerError::InvalidTicketData { index, reason }) => {
                assert_eq!(index, 1);
                assert_eq!(reason, "missing key");
            }
            other => panic!("expected InvalidTicketData, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_missing_status() {
        let body = r#"{"issues": [{"key": "PUP-1", "fields": {"issuetype": {"name": "Bug"}}}]}"#;
        let err = parse(body).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid ticket data in issue 0: PUP-1: missing status name"
        );
    }

    #[test]
    fn test_parse_missing_issue_type() {
        let body = r#"{"issues": [{"key": "PUP-1", "fields": {"status": {"name": "Open"}}}]}"#;
        assert!(matches!(
            parse(body),
            Err(TrackerError::InvalidTicketData { index: 0, .. })
        ));
    }

    #[test]
    fn test_parse_issues_not_array() {
        assert!(matches!(
            parse(r#"{"issues": "nope"}"#),
            Err(TrackerError::InvalidTicketData { .. })
        ));
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(
            parse("<html>"),
            Err(TrackerError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_parse_custom_field_ids() {
        let fields = FieldMap {
            team: "customfield_1".to_string(),
            release_notes: "customfield_2".to_string(),
        };
        let body = r#"{"issues": [{"key": "PUP-1", "fields": {
            "status": {"name": "Open"}, "issuetype": {"name": "Bug"},
            "customfield_1": {"name": "Core"}, "customfield_2": "Note"
        }}]}"#;

        let tickets = parse_search_response(body, &fields).unwrap();
        assert_eq!(tickets[0].team.as_deref(), Some("Core"));
        assert_eq!(tickets[0].release_note.as_deref(), Some("Note"));
    }
}
