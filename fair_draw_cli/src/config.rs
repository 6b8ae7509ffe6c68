// Configuration for the `fair-draw` binary.
//
// Loaded from a JSON file given by `--config` or `FAIR_DRAW_CONFIG`; every
// field is optional and falls back to the defaults below, so `{}` is a
// valid config. Only presentation defaults live here. Nothing in the config
// can change the result of a draw whose inputs are all given explicitly.

use std::path::Path;

use anyhow::Context;
use fair_draw::StepIndex;
use serde::{Deserialize, Serialize};

use crate::digest::DigestAlgorithm;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FairDrawConfig {
    /// Steps reported when a draw names none.
    pub default_steps: Vec<StepIndex>,
    /// Length of generated commitment text.
    pub commitment_length: usize,
    /// Digest used by `commit` and `verify` when not given on the command line.
    pub digest: DigestAlgorithm,
}

impl Default for FairDrawConfig {
    fn default() -> Self {
        Self {
            default_steps: vec![StepIndex::DEFAULT],
            commitment_length: 64,
            digest: DigestAlgorithm::default(),
        }
    }
}

impl FairDrawConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read and parse a config file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_json(&json)
            .with_context(|| format!("parsing config {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// `load(path)` if a path was given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
