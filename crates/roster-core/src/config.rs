use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, RosterError};

pub const DEFAULT_CONFIG_FILE: &str = "roster.toml";

pub const ENV_INPUT: &str = "ROSTER_INPUT";
pub const ENV_OUTPUT: &str = "ROSTER_OUTPUT";
pub const ENV_PREVIEW: &str = "ROSTER_PREVIEW";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RosterConfig {
    /// Registration export to read.
    pub input: PathBuf,
    /// Where the participant table is written.
    pub output: PathBuf,
    /// How many retained records to echo after a run.
    pub preview: usize,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data/registrations.csv"),
            output: PathBuf::from("data/participants.csv"),
            preview: 3,
        }
    }
}

impl RosterConfig {
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| RosterError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| RosterError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Like [`RosterConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(RosterError::ConfigRead { source, .. }) if source.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn with_env(self) -> Result<Self> {
        self.with_env_lookup(|key| std::env::var(key).ok())
    }

    /// Apply `ROSTER_*` overrides from `lookup`. Empty values are ignored.
    pub fn with_env_lookup<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(input) = non_empty(ENV_INPUT) {
            self.input = PathBuf::from(input);
        }
        if let Some(output) = non_empty(ENV_OUTPUT) {
            self.output = PathBuf::from(output);
        }
        if let Some(preview) = non_empty(ENV_PREVIEW) {
            self.preview = preview.trim().parse().map_err(|err| RosterError::Config {
                key: ENV_PREVIEW,
                message: format!("'{preview}' is not a row count: {err}"),
            })?;
        }
        Ok(self)
    }
}
