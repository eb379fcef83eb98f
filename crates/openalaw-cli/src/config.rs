use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use color_eyre::{eyre::WrapErr, Result};
use dirs::config_dir;
use openalaw_core::{
    agent::{KeywordSet, RoutingRules, DEFAULT_ANALYSIS_KEYWORDS, DEFAULT_CODE_KEYWORDS},
    config::{AgentConfig, DEFAULT_AGENT_ID},
};
use openalaw_orchestrator::detect::{
    SystemRules, DEFAULT_CAPTURE_KEYWORDS, DEFAULT_SYSTEM_KEYWORDS, DEFAULT_TOUCH_KEYWORDS,
};
use serde::{Deserialize, Serialize};

/// User-level configuration loaded from `~/.config/openalaw/config.toml` (platform-specific).
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct Config {
    /// Override for the agent identifier.
    pub agent_id: Option<String>,
    /// Keyword list overrides; unset lists keep their defaults.
    pub keywords: Option<KeywordConfig>,
    /// Anything else is handed to the agent untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, toml::Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct KeywordConfig {
    pub code: Option<Vec<String>>,
    pub analysis: Option<Vec<String>>,
    pub system: Option<Vec<String>>,
    pub capture: Option<Vec<String>>,
    pub touch: Option<Vec<String>>,
}

impl Config {
    /// Config with every default spelled out, used by `config init`.
    pub fn with_defaults() -> Self {
        let list = |words: &[&str]| -> Option<Vec<String>> {
            Some(words.iter().map(|w| w.to_string()).collect())
        };
        Self {
            agent_id: Some(DEFAULT_AGENT_ID.to_string()),
            keywords: Some(KeywordConfig {
                code: list(DEFAULT_CODE_KEYWORDS),
                analysis: list(DEFAULT_ANALYSIS_KEYWORDS),
                system: list(DEFAULT_SYSTEM_KEYWORDS),
                capture: list(DEFAULT_CAPTURE_KEYWORDS),
                touch: list(DEFAULT_TOUCH_KEYWORDS),
            }),
            extra: BTreeMap::new(),
        }
    }

    fn keywords(&self) -> KeywordConfig {
        self.keywords.clone().unwrap_or_default()
    }

    /// Build the core agent configuration.
    pub fn agent_config(&self) -> Result<AgentConfig> {
        let keywords = self.keywords();
        let defaults = RoutingRules::default();
        let routing = RoutingRules {
            code: keywords.code.map(KeywordSet::new).unwrap_or(defaults.code),
            analysis: keywords
                .analysis
                .map(KeywordSet::new)
                .unwrap_or(defaults.analysis),
        };

        let mut extra = BTreeMap::new();
        for (key, value) in &self.extra {
            extra.insert(key.clone(), serde_json::to_value(value)?);
        }

        let mut config = AgentConfig {
            routing,
            extra,
            ..AgentConfig::default()
        };
        if let Some(agent_id) = &self.agent_id {
            config.agent_id = agent_id.clone();
        }
        Ok(config)
    }

    /// Build the orchestrator's device-interaction rules.
    pub fn system_rules(&self) -> SystemRules {
        let keywords = self.keywords();
        let defaults = SystemRules::default();
        SystemRules {
            interaction: keywords
                .system
                .map(KeywordSet::new)
                .unwrap_or(defaults.interaction),
            capture: keywords
                .capture
                .map(KeywordSet::new)
                .unwrap_or(defaults.capture),
            touch: keywords.touch.map(KeywordSet::new).unwrap_or(defaults.touch),
        }
    }
}

/// Load config from the default path; if missing, return defaults.
pub fn load() -> Result<Config> {
    let path = default_path()?;
    load_from_path(path)
}

/// Read the config at `path`. A missing or blank file means "use the
/// built-in keywords and identity".
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(err) => {
            return Err(err).wrap_err_with(|| format!("reading {}", path.display()));
        }
    };
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    toml::from_str(&contents)
        .wrap_err_with(|| format!("invalid openalaw config {}", path.display()))
}

/// Resolve the default config path (platform aware).
pub fn default_path() -> Result<PathBuf> {
    let base = config_dir().ok_or_else(|| color_eyre::eyre::eyre!("no config dir available"))?;
    Ok(base.join("openalaw").join("config.toml"))
}

/// Write the default config to the default path unless a file is already there.
pub fn write_default_if_missing() -> Result<PathBuf> {
    let path = default_path()?;
    write_to_path_if_missing(&Config::with_defaults(), &path)?;
    Ok(path)
}

/// Write `config` to `path`, creating parent directories as needed.
/// An existing file is left alone so user edits are never clobbered.
pub fn write_to_path_if_missing(config: &Config, path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let body = toml::to_string_pretty(config)?;
    fs::write(path, body)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use openalaw_core::agent::ExecutionTarget;

    use super::*;

    #[test]
    fn returns_default_when_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = load_from_path(dir.path().join("config.toml")).expect("load");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn returns_default_when_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "   \n").expect("write");
        assert_eq!(load_from_path(&path).expect("load"), Config::default());
    }

    #[test]
    fn malformed_config_names_the_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "agent_id = [").expect("write");

        let err = load_from_path(&path).expect_err("malformed toml");
        assert!(err.to_string().contains("invalid openalaw config"));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn parses_custom_config() {
        let contents = r#"
            agent_id = "AgentBot42"
            log_dir = "/tmp/openalaw"
            [keywords]
            code = ["Kotlin", "gradle"]
            touch = ["press"]
        "#;
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, contents).expect("write temp config");

        let cfg = load_from_path(&path).expect("load");
        assert_eq!(cfg.agent_id.as_deref(), Some("AgentBot42"));
        assert_eq!(
            cfg.keywords,
            Some(KeywordConfig {
                code: Some(vec!["Kotlin".into(), "gradle".into()]),
                touch: Some(vec!["press".into()]),
                ..KeywordConfig::default()
            })
        );
        assert_eq!(
            cfg.extra.get("log_dir"),
            Some(&toml::Value::String("/tmp/openalaw".into()))
        );
    }

    #[test]
    fn overrides_flow_into_agent_and_system_rules() {
        let cfg = Config {
            agent_id: Some("AgentBot42".into()),
            keywords: Some(KeywordConfig {
                code: Some(vec!["Kotlin".into()]),
                touch: Some(vec!["press".into()]),
                ..KeywordConfig::default()
            }),
            extra: BTreeMap::from([("retries".to_string(), toml::Value::Integer(3))]),
        };

        let agent = cfg.agent_config().expect("agent config");
        assert_eq!(agent.agent_id, "AgentBot42");
        assert_eq!(
            agent.routing.classify("think about kotlin"),
            ExecutionTarget::Local
        );
        assert_eq!(
            agent.routing.classify("write python"),
            ExecutionTarget::Local,
            "unmatched tasks still default to local"
        );
        assert_eq!(agent.routing.classify("think"), ExecutionTarget::Remote);
        assert_eq!(agent.extra.get("retries"), Some(&serde_json::Value::from(3)));

        let rules = cfg.system_rules();
        assert_eq!(rules.touch, KeywordSet::new(["press"]));
        assert_eq!(rules.capture, SystemRules::default().capture);
    }

    #[test]
    fn default_config_uses_builtin_rules() {
        let cfg = Config::default();
        assert_eq!(cfg.agent_config().expect("agent").routing, RoutingRules::default());
        assert_eq!(cfg.system_rules(), SystemRules::default());
    }

    #[test]
    fn write_default_creates_file_once() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");
        let cfg = Config::with_defaults();

        assert!(write_to_path_if_missing(&cfg, &path).expect("write should succeed"));
        assert!(!write_to_path_if_missing(&Config::default(), &path).expect("second write ok"));

        let loaded = load_from_path(&path).expect("load");
        assert_eq!(loaded, cfg);
        assert_eq!(loaded.system_rules(), SystemRules::default());
    }
}
