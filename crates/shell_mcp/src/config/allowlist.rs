use std::collections::BTreeMap;

use serde::Serialize;

use crate::errors::{ConfigError, ConfigResult};

const NPM_SUBCOMMANDS: &[&str] = &["install", "test", "run", "build", "start", "dev", "lint"];
const GIT_SUBCOMMANDS: &[&str] = &["status", "log", "diff", "show", "branch"];
const UNRESTRICTED: &[&str] = &["echo", "cat", "ls", "pwd", "grep", "head", "tail", "wc"];

/// Programs that may be spawned, keyed by lower-cased name
///
/// Each entry lists the permitted first arguments. An empty list permits any
/// arguments; only the first argument is ever checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Allowlist {
    entries: BTreeMap<String, Vec<String>>,
}

impl Allowlist {
    /// Build from `(command, permitted first arguments)` pairs
    ///
    /// Command names are lower-cased; two names that collide after that are
    /// rejected.
    pub fn from_entries<I, C, A>(entries: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = (C, A)>,
        C: AsRef<str>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        let mut table = BTreeMap::new();
        for (command, args) in entries {
            let key = command.as_ref().to_lowercase();
            if key.is_empty() {
                return Err(ConfigError::EmptyCommand);
            }
            let args: Vec<String> = args.into_iter().map(Into::into).collect();
            if table.insert(key.clone(), args).is_some() {
                return Err(ConfigError::DuplicateCommand { command: key });
            }
        }
        Ok(Self { entries: table })
    }

    /// Parse a JSON object of the form `{"npm": ["install", "test"], "echo": []}`
    pub fn from_json(raw: &str) -> ConfigResult<Self> {
        let entries: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(raw).map_err(ConfigError::AllowlistParse)?;

        let mut parsed = Vec::with_capacity(entries.len());
        for (command, args) in entries {
            let args: Vec<String> =
                serde_json::from_value(args).map_err(ConfigError::AllowlistParse)?;
            parsed.push((command, args));
        }
        Self::from_entries(parsed)
    }

    /// Case-insensitive lookup returning the canonical name and its permitted
    /// first arguments
    pub fn lookup(&self, command: &str) -> Option<(&str, &[String])> {
        self.entries
            .get_key_value(&command.to_lowercase())
            .map(|(name, args)| (name.as_str(), args.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Allowlist {
    fn default() -> Self {
        let mut entries: BTreeMap<String, Vec<String>> = BTreeMap::new();
        entries.insert(
            "npm".to_string(),
            NPM_SUBCOMMANDS.iter().map(|s| s.to_string()).collect(),
        );
        entries.insert(
            "git".to_string(),
            GIT_SUBCOMMANDS.iter().map(|s| s.to_string()).collect(),
        );
        for command in UNRESTRICTED {
            entries.insert(command.to_string(), Vec::new());
        }
        Self { entries }
    }
}
