use std::fmt;

use serde::{Deserialize, Serialize};

/// Keywords that pin a task to local execution. Checked before analysis keywords.
pub const DEFAULT_CODE_KEYWORDS: &[&str] = &[
    "code",
    "programming",
    "python",
    "javascript",
    "function",
    "algorithm",
    "debug",
];

/// Keywords that send a task to a remote model when no code keyword matched.
pub const DEFAULT_ANALYSIS_KEYWORDS: &[&str] =
    &["analyze", "think", "summarize", "creative", "complex"];

/// Case-insensitive substring matcher over a fixed list of keywords.
///
/// Keywords are lower-cased on construction and empty entries are dropped,
/// since an empty keyword would match every task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl KeywordSet {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    /// First keyword (in declaration order) found anywhere in `text`.
    pub fn first_match(&self, text: &str) -> Option<&str> {
        let lowered = text.to_lowercase();
        self.keywords
            .iter()
            .find(|k| lowered.contains(k.as_str()))
            .map(String::as_str)
    }

    pub fn matches(&self, text: &str) -> bool {
        self.first_match(text).is_some()
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

impl From<Vec<String>> for KeywordSet {
    fn from(value: Vec<String>) -> Self {
        KeywordSet::new(value)
    }
}

impl From<KeywordSet> for Vec<String> {
    fn from(value: KeywordSet) -> Self {
        value.keywords
    }
}

/// Where a task should be executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionTarget {
    Local,
    Remote,
}

impl ExecutionTarget {
    /// Prefix used by the dispatch router when formatting a processed task.
    pub fn label(self) -> &'static str {
        match self {
            ExecutionTarget::Local => "LOCAL",
            ExecutionTarget::Remote => "REMOTE",
        }
    }
}

impl fmt::Display for ExecutionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionTarget::Local => f.write_str("local"),
            ExecutionTarget::Remote => f.write_str("remote"),
        }
    }
}

/// Execution-target routing rules. Code keywords win over analysis keywords
/// no matter where they appear in the task; anything else stays local.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingRules {
    pub code: KeywordSet,
    pub analysis: KeywordSet,
}

impl Default for RoutingRules {
    fn default() -> Self {
        Self {
            code: KeywordSet::new(DEFAULT_CODE_KEYWORDS),
            analysis: KeywordSet::new(DEFAULT_ANALYSIS_KEYWORDS),
        }
    }
}

impl RoutingRules {
    pub fn classify(&self, task: &str) -> ExecutionTarget {
        if self.code.matches(task) {
            ExecutionTarget::Local
        } else if self.analysis.matches(task) {
            ExecutionTarget::Remote
        } else {
            ExecutionTarget::Local
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_keywords_route_locally_even_with_analysis_words() {
        let rules = RoutingRules::default();
        assert_eq!(rules.classify("Write a Python script"), ExecutionTarget::Local);
        assert_eq!(
            rules.classify("analyze and summarize this algorithm"),
            ExecutionTarget::Local
        );
        assert_eq!(
            rules.classify("think hard, then DEBUG it"),
            ExecutionTarget::Local
        );
    }

    #[test]
    fn analysis_keywords_alone_route_remotely() {
        let rules = RoutingRules::default();
        assert_eq!(rules.classify("Analyze this input"), ExecutionTarget::Remote);
        assert_eq!(rules.classify("a COMPLEX question"), ExecutionTarget::Remote);
        assert_eq!(rules.classify("summarize the meeting"), ExecutionTarget::Remote);
    }

    #[test]
    fn unmatched_and_empty_tasks_default_to_local() {
        let rules = RoutingRules::default();
        assert_eq!(rules.classify(""), ExecutionTarget::Local);
        assert_eq!(rules.classify("open the door"), ExecutionTarget::Local);
    }

    #[test]
    fn matching_is_plain_substring() {
        let rules = RoutingRules::default();
        // "barcode" contains "code"; no tokenization is applied.
        assert_eq!(rules.classify("scan the barcode"), ExecutionTarget::Local);
        // "rethink" contains "think".
        assert_eq!(rules.classify("rethink the plan"), ExecutionTarget::Remote);
    }

    #[test]
    fn keyword_sets_lowercase_and_drop_empty_entries() {
        let set = KeywordSet::new(["Swipe", "", "TAP"]);
        assert_eq!(set.keywords(), ["swipe".to_string(), "tap".to_string()]);
        assert_eq!(set.first_match("please tap twice"), Some("tap"));
        assert!(!set.matches("nothing relevant"));
    }

    #[test]
    fn custom_rules_change_classification_boundaries() {
        let rules = RoutingRules {
            code: KeywordSet::new(["rust"]),
            analysis: KeywordSet::new(["ponder"]),
        };
        assert_eq!(rules.classify("ponder rust lifetimes"), ExecutionTarget::Local);
        assert_eq!(rules.classify("ponder the weather"), ExecutionTarget::Remote);
        assert_eq!(rules.classify("analyze python"), ExecutionTarget::Local);
    }

    #[test]
    fn keyword_set_deserializes_from_plain_list() {
        let set: KeywordSet = serde_json::from_str(r#"["Screen", "UI"]"#).expect("parse");
        assert_eq!(set, KeywordSet::new(["screen", "ui"]));
    }
}
