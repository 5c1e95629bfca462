pub mod analyzer;
pub mod config;
pub mod error;
pub mod lexer;
pub mod lexicon;
pub mod parser;
pub mod report;
pub mod session;
pub mod source;
pub mod utils;

pub use analyzer::{analyze, analyze_text, Analysis, ScoringPolicy};
pub use config::Settings;
pub use error::SentimentError;
pub use lexicon::{KeyNormalization, Lexicon, LexiconLoad, LoadHandle};
pub use report::{Report, ReportFormat, ReportTarget};
pub use session::Session;
pub use source::Source;
