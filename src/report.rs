use crate::analyzer::Analysis;
use crate::error::SentimentError;
use serde::Serialize;
use std::fmt::{self, Display};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportTarget {
    /// Create or overwrite this file.
    File(PathBuf),
    Stdout,
}

impl Display for ReportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportTarget::File(path) => write!(f, "{}", path.display()),
            ReportTarget::Stdout => write!(f, "<stdout>"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "yaml" | "yml" => Ok(ReportFormat::Yaml),
            other => Err(format!(
                "unknown report format `{other}`, expected `text`, `json` or `yaml`"
            )),
        }
    }
}

/// The analyzed text together with its score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub text: String,
    pub analysis: Analysis,
}

impl Report {
    pub fn new(text: impl Into<String>, analysis: Analysis) -> Self {
        Self {
            text: text.into(),
            analysis,
        }
    }

    #[must_use]
    pub fn score(&self) -> f64 {
        self.analysis.score
    }

    /// The two-line plain text report.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "Analyzed Text: {}\nAverage Sentiment Score: {}\n",
            self.text,
            format_score(self.analysis.score)
        )
    }

    /// Serializes the report into a pretty-printed JSON string.
    ///
    /// # Errors
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serializes the report into a YAML string.
    ///
    /// # Errors
    /// Returns a `serde_yaml::Error` if serialization fails.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// # Errors
    /// Returns an encoding error for JSON or YAML output.
    pub fn format(&self, format: ReportFormat) -> Result<String, SentimentError> {
        Ok(match format {
            ReportFormat::Text => self.render(),
            ReportFormat::Json => self.to_json()? + "\n",
            ReportFormat::Yaml => self.to_yaml()?,
        })
    }

    /// What [`Report::write_to`] emits. Only plain text on stdout gets the
    /// `Report:` header; JSON and YAML stay parseable.
    ///
    /// # Errors
    /// Returns an encoding error for JSON or YAML output.
    pub fn body_for(&self, target: &ReportTarget, format: ReportFormat) -> Result<String, SentimentError> {
        let body = self.format(format)?;
        Ok(match (target, format) {
            (ReportTarget::Stdout, ReportFormat::Text) => format!("Report:\n{body}"),
            _ => body,
        })
    }

    /// Writes the report in `format` to `target`.
    ///
    /// # Errors
    /// Returns [`SentimentError::ReportWrite`] if the file cannot be written.
    pub fn write_to(&self, target: &ReportTarget, format: ReportFormat) -> Result<(), SentimentError> {
        let body = self.body_for(target, format)?;
        match target {
            ReportTarget::File(path) => {
                std::fs::write(path, body).map_err(|source| SentimentError::ReportWrite {
                    path: path.clone(),
                    source,
                })?;
                log::info!("Report written to {}", path.display());
            }
            ReportTarget::Stdout => print!("{body}"),
        }
        Ok(())
    }
}

/// Formats a score as a plain decimal: never in exponent form, always with a
/// decimal point, at full precision.
#[must_use]
pub fn format_score(score: f64) -> String {
    let formatted = score.to_string();
    if score.is_finite() && !formatted.contains('.') {
        formatted + ".0"
    } else {
        formatted
    }
}
