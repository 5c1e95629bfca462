//! The Lexicon Store: a concurrent word → score mapping.
//!
//! A [`Lexicon`] is a cheap handle; clones share the same underlying map, so a
//! background load started with [`Lexicon::spawn_load`] is visible to every
//! clone once it finishes. Inserts are atomic per key and lookups never see a
//! partially written entry.

use crate::config::Settings;
use crate::error::{LexiconError, MalformedLine};
use crate::parser::{ParsedLexicon, Parser};
use crate::source::Source;
use dashmap::DashMap;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Score returned by [`Lexicon::lookup`] for words that are not present.
pub const DEFAULT_SCORE: f64 = 0.0;

/// How lexicon keys are normalized, both when stored and when looked up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyNormalization {
    /// Keys are lower-cased on insert and on lookup.
    #[default]
    Lowercase,
    /// Keys are stored exactly as written. Since the scorer lower-cases
    /// tokens, mixed-case entries can then never match.
    AsStored,
}

impl FromStr for KeyNormalization {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lowercase" => Ok(KeyNormalization::Lowercase),
            "as-stored" => Ok(KeyNormalization::AsStored),
            other => Err(format!(
                "unknown key normalization `{other}`, expected `lowercase` or `as-stored`"
            )),
        }
    }
}

/// Summary of one completed load.
#[derive(Debug, Clone, Default)]
pub struct LexiconLoad {
    pub source: String,
    /// Entries for words the lexicon did not hold before.
    pub inserted: usize,
    /// Entries that replaced an existing score (last write wins).
    pub overwritten: usize,
    pub skipped: Vec<MalformedLine>,
}

impl LexiconLoad {
    /// Total number of well-formed entries applied.
    #[must_use]
    pub fn applied(&self) -> usize {
        self.inserted + self.overwritten
    }
}

#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: Arc<DashMap<String, f64>>,
    normalization: KeyNormalization,
}

impl Lexicon {
    /// Creates an empty lexicon that lower-cases its keys.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_normalization(normalization: KeyNormalization) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            normalization,
        }
    }

    #[must_use]
    pub fn normalization(&self) -> KeyNormalization {
        self.normalization
    }

    fn key<'w>(&self, word: &'w str) -> Cow<'w, str> {
        match self.normalization {
            KeyNormalization::Lowercase => Cow::Owned(word.to_lowercase()),
            KeyNormalization::AsStored => Cow::Borrowed(word),
        }
    }

    /// Inserts or overwrites a score, returning the previous one.
    pub fn insert(&self, word: &str, score: f64) -> Option<f64> {
        self.entries.insert(self.key(word).into_owned(), score)
    }

    /// The score for `word`, or [`DEFAULT_SCORE`] when it is not present.
    /// Never fails, including while a load is in progress.
    #[must_use]
    pub fn lookup(&self, word: &str) -> f64 {
        self.get(word).unwrap_or(DEFAULT_SCORE)
    }

    /// Presence-aware lookup: distinguishes a stored `0.0` from an absent word.
    #[must_use]
    pub fn get(&self, word: &str) -> Option<f64> {
        let key = self.key(word);
        self.entries.get(&*key).map(|entry| *entry.value())
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        let key = self.key(word);
        self.entries.contains_key(&*key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    /// A sorted copy of the current contents.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, f64> {
        self.entries
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }

    /// Merges already-parsed entries, in order, into the lexicon.
    pub fn merge(&self, parsed: ParsedLexicon, source: &str) -> LexiconLoad {
        let mut load = LexiconLoad {
            source: source.to_string(),
            skipped: parsed.skipped,
            ..LexiconLoad::default()
        };

        for entry in parsed.entries {
            match self.insert(&entry.word, entry.score) {
                Some(_) => load.overwritten += 1,
                None => load.inserted += 1,
            }
        }

        info!(
            "Loaded lexicon {}: {} new, {} overwritten, {} skipped",
            load.source,
            load.inserted,
            load.overwritten,
            load.skipped.len()
        );
        load
    }

    /// Parses `source_text` and merges it synchronously. Malformed lines are
    /// skipped and reported on the returned summary.
    pub fn load_str(&self, source_text: &str, name: &str) -> LexiconLoad {
        let parsed = Parser::new_with_name(source_text, name.to_string()).parse();
        self.merge(parsed, name)
    }

    /// Reads the whole source, then merges it. When the source cannot be read
    /// nothing is merged and the previous contents stay intact.
    ///
    /// # Errors
    /// Returns [`LexiconError::SourceUnreadable`] if the file or URL cannot be
    /// read within `fetch_timeout`.
    pub async fn load(
        &self,
        source: &Source,
        fetch_timeout: Duration,
    ) -> Result<LexiconLoad, LexiconError> {
        let location = source.to_string();
        let text = source.fetch(fetch_timeout).await.map_err(|err| {
            warn!("Lexicon {location} could not be read: {err}");
            LexiconError::SourceUnreadable {
                location: location.clone(),
                source: err,
            }
        })?;

        Ok(self.load_str(&text, &location))
    }

    /// Starts a load on a background task and returns immediately.
    ///
    /// The lexicon may still be empty or partially filled when this returns;
    /// await [`LoadHandle::wait`] before relying on its contents.
    ///
    /// # Errors
    /// Returns [`LexiconError::NoRuntime`] when called outside a tokio
    /// runtime; nothing is loaded then.
    pub fn spawn_load(&self, source: Source, settings: &Settings) -> Result<LoadHandle, LexiconError> {
        let runtime = Handle::try_current().map_err(|_| LexiconError::NoRuntime {
            location: source.to_string(),
        })?;
        let lexicon = self.clone();
        let location = source.to_string();
        let fetch_timeout = settings.fetch_timeout;
        let load_timeout = settings.load_timeout;

        let task_location = location.clone();
        let task = runtime.spawn(async move {
            match tokio::time::timeout(load_timeout, lexicon.load(&source, fetch_timeout)).await {
                Ok(result) => result,
                Err(_) => {
                    warn!("Lexicon load of {task_location} timed out after {load_timeout:?}");
                    Err(LexiconError::Timeout {
                        location: task_location,
                        timeout: load_timeout,
                    })
                }
            }
        });

        Ok(LoadHandle { location, task })
    }
}

/// Completion signal for a load started with [`Lexicon::spawn_load`].
#[derive(Debug)]
pub struct LoadHandle {
    location: String,
    task: JoinHandle<Result<LexiconLoad, LexiconError>>,
}

impl LoadHandle {
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the load to complete or fail.
    ///
    /// # Errors
    /// Propagates the load's own error, or [`LexiconError::TaskFailed`] if the
    /// background task panicked or was cancelled.
    pub async fn wait(self) -> Result<LexiconLoad, LexiconError> {
        let LoadHandle { location, task } = self;
        match task.await {
            Ok(result) => result,
            Err(err) => Err(LexiconError::TaskFailed {
                location,
                message: err.to_string(),
            }),
        }
    }
}
