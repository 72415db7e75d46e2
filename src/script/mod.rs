//! Conversation script: the fixed sequence of steps the demo plays back.
//!
//! A [`Script`] is built once at startup (either the built-in Performance
//! Advisor conversation or a TOML file) and never changes afterwards.

mod builtin;
pub mod reports;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AdvisorError;

/// Who is speaking in a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Assistant,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Assistant => "assistant",
            Role::User => "user",
        }
    }
}

/// A single scripted message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub text: String,
}

impl Message {
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }
}

/// How the assistant messages of a step are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Presentation {
    /// Literal message text
    #[default]
    Plain,
    /// Greeting with the capability list
    RichIntro,
    /// "Issues Found" report for the cluster overview
    RichFindings,
    /// Anomalies summary
    RichAnomalies,
    /// Top queries breakdown
    RichQueries,
    /// SQL tuning recommendation
    RichTuning,
}

/// Illustration variants shown next to the chat
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Illustration {
    /// The configured default image
    #[default]
    Overview,
    /// Cluster load with issue windows highlighted
    Highlighted,
    /// Anomalies view
    Anomalies,
    /// Queries tab
    Queries,
}

impl Illustration {
    /// Asset file name for this variant. `Overview` resolves to the
    /// configured image instead.
    pub fn asset_name(&self) -> &'static str {
        match self {
            Illustration::Overview => "pa_example.png",
            Illustration::Highlighted => "pa_example_highlighted.png",
            Illustration::Anomalies => "pa_example_anomalies.png",
            Illustration::Queries => "pa_example_queries.png",
        }
    }

    pub fn caption(&self) -> &'static str {
        match self {
            Illustration::Overview => "Cluster Load",
            Illustration::Highlighted => "Cluster Load (issue windows highlighted)",
            Illustration::Anomalies => "Anomalies",
            Illustration::Queries => "Queries",
        }
    }
}

/// One unit of playback
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub presentation: Presentation,
    /// Show the "thinking" placeholder before each assistant message
    #[serde(default)]
    pub thinking: bool,
    /// Illustration to swap in when the assistant answer is revealed
    #[serde(default)]
    pub illustration: Option<Illustration>,
}

impl Step {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            presentation: Presentation::Plain,
            thinking: false,
            illustration: None,
        }
    }

    pub fn with_presentation(mut self, presentation: Presentation) -> Self {
        self.presentation = presentation;
        self
    }

    pub fn with_thinking(mut self) -> Self {
        self.thinking = true;
        self
    }

    pub fn with_illustration(mut self, illustration: Illustration) -> Self {
        self.illustration = Some(illustration);
        self
    }
}

/// Immutable, ordered sequence of steps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    steps: Vec<Step>,
}

impl Script {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// The built-in Performance Advisor conversation
    pub fn performance_advisor() -> Self {
        builtin::performance_advisor()
    }

    /// Load a script from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, AdvisorError> {
        let contents = fs::read_to_string(path).map_err(|source| AdvisorError::ScriptRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| AdvisorError::ScriptParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Index of the final step, if any
    pub fn last_index(&self) -> Option<usize> {
        self.steps.len().checked_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_script_shape() {
        let script = Script::performance_advisor();
        assert_eq!(script.len(), 5);
        assert_eq!(script.last_index(), Some(4));

        let intro = script.step(0).unwrap();
        assert_eq!(intro.presentation, Presentation::RichIntro);
        assert!(!intro.thinking);
        assert_eq!(intro.messages.len(), 1);
        assert_eq!(intro.messages[0].role, Role::Assistant);

        for step in &script.steps()[1..] {
            assert!(step.thinking, "answers after the intro should think first");
            assert_eq!(step.messages[0].role, Role::User);
            assert_eq!(step.messages[1].role, Role::Assistant);
        }

        assert_eq!(script.step(1).unwrap().illustration, Some(Illustration::Highlighted));
        assert_eq!(script.step(4).unwrap().illustration, None);
    }

    #[test]
    fn test_empty_script() {
        let script = Script::default();
        assert!(script.is_empty());
        assert_eq!(script.last_index(), None);
        assert!(script.step(0).is_none());
    }

    #[test]
    fn test_parse_script_from_toml() {
        let toml = r#"
            [[steps]]
            presentation = "rich_intro"

            [[steps.messages]]
            role = "assistant"
            text = "Hello"

            [[steps]]
            thinking = true
            illustration = "anomalies"

            [[steps.messages]]
            role = "user"
            text = "Q"

            [[steps.messages]]
            role = "assistant"
            text = "A"
        "#;

        let script: Script = toml::from_str(toml).unwrap();
        assert_eq!(script.len(), 2);
        assert_eq!(script.step(0).unwrap().presentation, Presentation::RichIntro);
        assert!(!script.step(0).unwrap().thinking);

        let second = script.step(1).unwrap();
        assert_eq!(second.presentation, Presentation::Plain);
        assert!(second.thinking);
        assert_eq!(second.illustration, Some(Illustration::Anomalies));
        assert_eq!(second.messages, vec![Message::user("Q"), Message::assistant("A")]);
    }

    #[test]
    fn test_from_file_reports_missing_file() {
        let err = Script::from_file(Path::new("/nonexistent/script.toml")).unwrap_err();
        assert!(matches!(err, AdvisorError::ScriptRead { .. }));
    }

    #[test]
    fn test_from_file_reports_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[[steps]]\npresentation = \"sparkly\"").unwrap();

        let err = Script::from_file(file.path()).unwrap_err();
        assert!(matches!(err, AdvisorError::ScriptParse { .. }));
    }
}
