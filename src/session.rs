//! State behind the interactive menu: the loaded lexicon, the current text
//! and where reports go. Failed loads never disturb what was loaded before.

use crate::analyzer::analyze;
use crate::config::Settings;
use crate::error::SentimentError;
use crate::lexicon::{Lexicon, LexiconLoad};
use crate::report::{Report, ReportFormat, ReportTarget};
use crate::source::Source;
use log::{info, warn};

#[derive(Debug)]
pub struct Session {
    settings: Settings,
    lexicon: Lexicon,
    text: Option<String>,
    output: ReportTarget,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self {
            lexicon: Lexicon::with_normalization(settings.normalization),
            output: ReportTarget::File(settings.default_output.clone()),
            text: None,
            settings,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    #[must_use]
    pub fn output(&self) -> &ReportTarget {
        &self.output
    }

    pub fn set_output(&mut self, output: ReportTarget) {
        self.output = output;
    }

    /// Replaces the current text with the contents of `source`, returning its
    /// length in bytes. On failure the previous text is kept.
    ///
    /// # Errors
    /// Returns [`SentimentError::Source`] if the source cannot be read.
    pub async fn load_text(&mut self, source: &Source) -> Result<usize, SentimentError> {
        match source.fetch(self.settings.fetch_timeout).await {
            Ok(text) => {
                info!("Loaded {} bytes of text from {source}", text.len());
                let len = text.len();
                self.text = Some(text);
                Ok(len)
            }
            Err(err) => {
                warn!("Text source {source} could not be read: {err}");
                Err(err.into())
            }
        }
    }

    /// Loads a lexicon source into the session's lexicon on a background task
    /// and waits for it to finish, so the lexicon is ready when this returns.
    /// Entries merge into whatever was loaded before.
    ///
    /// # Errors
    /// Returns [`SentimentError::Lexicon`] if the load fails; the lexicon is
    /// then unchanged.
    pub async fn load_lexicon(&self, source: Source) -> Result<LexiconLoad, SentimentError> {
        let handle = self.lexicon.spawn_load(source, &self.settings)?;
        Ok(handle.wait().await?)
    }

    /// Scores the current text.
    ///
    /// # Errors
    /// Returns [`SentimentError::NoText`] when no text, or only empty text,
    /// has been loaded.
    pub fn analyze(&self) -> Result<Report, SentimentError> {
        let text = self
            .text
            .as_deref()
            .filter(|text| !text.is_empty())
            .ok_or(SentimentError::NoText)?;
        let analysis = analyze(text, &self.lexicon, self.settings.policy);
        Ok(Report::new(text, analysis))
    }

    /// Scores the current text and writes the report to the session output.
    ///
    /// # Errors
    /// Returns [`SentimentError::NoText`] without text, or a write error.
    pub fn execute(&self, format: ReportFormat) -> Result<Report, SentimentError> {
        let report = self.analyze()?;
        report.write_to(&self.output, format)?;
        Ok(report)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
