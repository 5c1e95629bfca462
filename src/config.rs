use crate::analyzer::ScoringPolicy;
use crate::lexicon::KeyNormalization;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_OUTPUT: &str = "./out.txt";

/// Runtime knobs shared by the library and the `sentiment` binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Upper bound on reading a single file or URL.
    pub fetch_timeout: Duration,
    /// Upper bound on a whole background lexicon load.
    pub load_timeout: Duration,
    pub normalization: KeyNormalization,
    pub policy: ScoringPolicy,
    /// Where the interactive session writes its report unless told otherwise.
    pub default_output: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            load_timeout: DEFAULT_LOAD_TIMEOUT,
            normalization: KeyNormalization::default(),
            policy: ScoringPolicy::default(),
            default_output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}
