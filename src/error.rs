use miette::{Diagnostic, NamedSource, SourceSpan};
use std::fmt::{self, Display};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum SentimentError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lexicon(#[from] LexiconError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Source(#[from] SourceError),

    #[error("No text data available for analysis")]
    #[diagnostic(
        code(session::no_text),
        help("Load text from a file or a URL before running the analysis.")
    )]
    NoText,

    #[error("Failed to write report to {}", .path.display())]
    #[diagnostic(
        code(report::write_failed),
        help("Check that the output directory exists and is writable.")
    )]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode report as JSON")]
    #[diagnostic(code(report::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to encode report as YAML")]
    #[diagnostic(code(report::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Error, Debug, Diagnostic)]
pub enum LexiconError {
    #[error("Lexicon source {location} could not be read")]
    #[diagnostic(
        code(lexicon::source_unreadable),
        help("The existing lexicon was left unchanged. Check the path or URL and try again.")
    )]
    SourceUnreadable {
        location: String,
        #[source]
        source: SourceError,
    },

    #[error("Loading lexicon {location} did not finish within {timeout:?}")]
    #[diagnostic(
        code(lexicon::timeout),
        help("The existing lexicon was left unchanged. Raise the load timeout for slow sources.")
    )]
    Timeout { location: String, timeout: Duration },

    #[error("Cannot start a background load of lexicon {location} outside a tokio runtime")]
    #[diagnostic(
        code(lexicon::no_runtime),
        help("Call `spawn_load` from async code, or use `Lexicon::load_str` synchronously.")
    )]
    NoRuntime { location: String },

    #[error("Background load of lexicon {location} failed: {message}")]
    #[diagnostic(code(lexicon::task_failed))]
    TaskFailed { location: String, message: String },
}

#[derive(Error, Debug, Diagnostic)]
pub enum SourceError {
    #[error("Failed to read {}", .path.display())]
    #[diagnostic(code(source::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Request to {url} failed: {message}")]
    #[diagnostic(code(source::http))]
    Http { url: String, message: String },

    #[error("Request to {url} returned status {status}")]
    #[diagnostic(code(source::status))]
    Status { url: String, status: u16 },

    #[error("Timed out after {timeout:?} reading {location}")]
    #[diagnostic(code(source::timeout))]
    Timeout { location: String, timeout: Duration },
}

/// Why a lexicon line was dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum MalformedReason {
    /// No comma, or the word or value on either side of it is empty.
    MissingField,
    /// The value does not parse as a number.
    InvalidNumber(String),
    /// The value parsed, but to `NaN` or an infinity.
    NonFinite(String),
}

impl Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedReason::MissingField => write!(f, "expected `word,value`"),
            MalformedReason::InvalidNumber(value) => write!(f, "`{value}` is not a number"),
            MalformedReason::NonFinite(value) => write!(f, "`{value}` is not a finite number"),
        }
    }
}

/// A lexicon line skipped during a load. Never returned as an `Err`; collected
/// on the load summary so callers can show them as warnings.
#[derive(Error, Debug, Diagnostic, Clone)]
#[error("Skipped line {line} of {name}: {reason}")]
#[diagnostic(
    code(lexicon::malformed_line),
    severity(Warning),
    help("Lexicon lines must have the form `word,value`, e.g. `happy,0.8`.")
)]
pub struct MalformedLine {
    #[source_code]
    pub src: NamedSource<String>,
    #[label("{reason}")]
    pub span: SourceSpan,
    pub name: String,
    pub line: usize,
    pub reason: MalformedReason,
}
