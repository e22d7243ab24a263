//! Configuration schema.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, ConfigResult};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Issue tracker configuration.
    #[serde(default)]
    pub jira: JiraConfig,

    /// Git range configuration.
    #[serde(default)]
    pub git: GitConfig,

    /// Report policy configuration.
    #[serde(default)]
    pub report: ReportConfig,
}

impl Config {
    /// Checks values that serde cannot.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending key.
    pub fn validate(&self) -> ConfigResult<()> {
        let required = [
            ("jira.url", &self.jira.url),
            ("jira.team_field", &self.jira.team_field),
            ("jira.release_notes_field", &self.jira.release_notes_field),
            ("git.to", &self.git.to),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{name} must not be empty")));
            }
        }

        if self.report.terminal_states.iter().any(|s| s.is_empty()) {
            return Err(ConfigError::Invalid(
                "report.terminal_states must not contain empty labels".to_string(),
            ));
        }

        Ok(())
    }

    /// Renders the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Issue tracker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JiraConfig {
    /// Base URL of the Jira instance.
    #[serde(default = "default_jira_url")]
    pub url: String,

    /// Default project key.
    pub project: Option<String>,

    /// Custom field holding the owning team.
    #[serde(default = "default_team_field")]
    pub team_field: String,

    /// Custom field holding the release note text.
    #[serde(default = "default_release_notes_field")]
    pub release_notes_field: String,
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            url: default_jira_url(),
            project: None,
            team_field: default_team_field(),
            release_notes_field: default_release_notes_field(),
        }
    }
}

fn default_jira_url() -> String {
    "https://tickets.puppetlabs.com".to_string()
}

fn default_team_field() -> String {
    "customfield_14200".to_string()
}

fn default_release_notes_field() -> String {
    "customfield_11100".to_string()
}

/// Git range configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitConfig {
    /// Default end of the revision range.
    #[serde(default = "default_to")]
    pub to: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self { to: default_to() }
    }
}

fn default_to() -> String {
    "master".to_string()
}

/// Report policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Commit tokens never reported as unknown.
    #[serde(default = "default_exempt_tokens")]
    pub exempt_tokens: Vec<String>,

    /// Status labels that count as resolved.
    #[serde(default = "default_terminal_states")]
    pub terminal_states: Vec<String>,

    /// Issue types that need no release note.
    #[serde(default = "default_release_note_exempt_types")]
    pub release_note_exempt_types: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            exempt_tokens: default_exempt_tokens(),
            terminal_states: default_terminal_states(),
            release_note_exempt_types: default_release_note_exempt_types(),
        }
    }
}

fn default_exempt_tokens() -> Vec<String> {
    ["MAINT", "DOC", "DOCS", "TRIVIAL", "PACKAGING", "UNMARKED"]
        .map(String::from)
        .to_vec()
}

fn default_terminal_states() -> Vec<String> {
    ["Resolved", "Closed", "Done"].map(String::from).to_vec()
}

fn default_release_note_exempt_types() -> Vec<String> {
    vec!["Epic".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.jira.url, "https://tickets.puppetlabs.com");
        assert!(config.jira.project.is_none());
        assert_eq!(config.git.to, "master");
        assert_eq!(config.report.exempt_tokens.len(), 6);
        assert_eq!(
            config.report.terminal_states,
            vec!["Resolved", "Closed", "Done"]
        );
        assert_eq!(config.report.release_note_exempt_types, vec!["Epic"]);
    }

    #[test]
    fn test_deserialize_empty_matches_default() {
        let config: Config = toml::from_str("").unwrap();
        let default = Config::default();
        assert_eq!(config.jira.url, default.jira.url);
        assert_eq!(config.jira.team_field, default.jira.team_field);
        assert_eq!(config.git.to, default.git.to);
        assert_eq!(config.report.exempt_tokens, default.report.exempt_tokens);
    }

    #[test]
    fn test_deserialize_minimal() {
        let toml = r#"
            [jira]
            project = "PUP"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.jira.project.as_deref(), Some("PUP"));
        assert_eq!(config.jira.url, "https://tickets.puppetlabs.com"); // default
    }

    #[test]
    fn test_deserialize_full() {
        let toml = r#"
            [jira]
            url = "https://jira.example.com"
            project = "FACT"
            team_field = "customfield_1"
            release_notes_field = "customfield_2"

            [git]
            to = "main"

            [report]
            exempt_tokens = ["MAINT"]
            terminal_states = ["Shipped"]
            release_note_exempt_types = ["Epic", "Sub-task"]
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.jira.url, "https://jira.example.com");
        assert_eq!(config.jira.project.as_deref(), Some("FACT"));
        assert_eq!(config.jira.team_field, "customfield_1");
        assert_eq!(config.jira.release_notes_field, "customfield_2");
        assert_eq!(config.git.to, "main");
        assert_eq!(config.report.exempt_tokens, vec!["MAINT"]);
        assert_eq!(config.report.terminal_states, vec!["Shipped"]);
        assert_eq!(config.report.release_note_exempt_types.len(), 2);
    }

    #[test]
    fn test_validate_default() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_url() {
        let mut config = Config::default();
        config.jira.url = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration: jira.url must not be empty"
        );
    }

    #[test]
    fn test_validate_empty_terminal_state() {
        let mut config = Config::default();
        config.report.terminal_states.push(String::new());
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_to_toml_round_trip() {
        let config = Config::default();
        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("[jira]"));
        assert!(rendered.contains("[report]"));

        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.report.terminal_states, config.report.terminal_states);
    }
}
