use crate::error::{MalformedLine, MalformedReason};
use log::debug;
use miette::NamedSource;

/// One `word,value` pair read from a lexicon source.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub word: String,
    pub score: f64,
}

/// The outcome of parsing a whole lexicon source: the good rows in source
/// order, and a diagnostic for every row that was dropped.
#[derive(Debug, Clone, Default)]
pub struct ParsedLexicon {
    pub entries: Vec<Entry>,
    pub skipped: Vec<MalformedLine>,
}

/// A best-effort parser for lexicon sources. Malformed lines are reported
/// and skipped; they never abort the rest of the source.
#[derive(Debug)]
pub struct Parser<'a> {
    name: String,
    source_text: &'a str,
}

impl<'a> Parser<'a> {
    pub fn new(source_text: &'a str) -> Self {
        Self::new_with_name(source_text, "lexicon".to_string())
    }

    pub fn new_with_name(source_text: &'a str, name: String) -> Self {
        Self { name, source_text }
    }

    pub fn parse(&self) -> ParsedLexicon {
        let mut parsed = ParsedLexicon::default();

        for (index, line) in self.source_text.lines().enumerate() {
            match parse_line(line) {
                Ok(Some(entry)) => parsed.entries.push(entry),
                Ok(None) => {}
                Err(reason) => {
                    debug!("{}:{}: skipping lexicon line ({reason})", self.name, index + 1);
                    parsed.skipped.push(self.malformed(index + 1, line, reason));
                }
            }
        }

        parsed
    }

    fn malformed(&self, line_number: usize, line: &str, reason: MalformedReason) -> MalformedLine {
        let line = line.trim_end_matches('\r');
        // Point at the value when there is one, otherwise at the whole line.
        let span = match (&reason, line.split_once(',')) {
            (MalformedReason::MissingField, _) | (_, None) => (0, line.len()),
            (_, Some((word, value))) => (word.len() + 1, value.len()),
        };

        MalformedLine {
            src: NamedSource::new(format!("{}:{line_number}", self.name), line.to_string()),
            span: span.into(),
            name: self.name.clone(),
            line: line_number,
            reason,
        }
    }
}

/// Parses a single lexicon line.
///
/// The line is split on its first comma; both halves are trimmed. Blank lines
/// yield `Ok(None)`.
///
/// # Errors
/// Returns the reason the line is malformed: a missing or empty field, a value
/// that is not a number, or a value that is not finite.
pub fn parse_line(line: &str) -> Result<Option<Entry>, MalformedReason> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, value) = line.split_once(',').ok_or(MalformedReason::MissingField)?;
    let (word, value) = (word.trim(), value.trim());
    if word.is_empty() || value.is_empty() {
        return Err(MalformedReason::MissingField);
    }

    let score: f64 = value
        .parse()
        .map_err(|_| MalformedReason::InvalidNumber(value.to_string()))?;
    if !score.is_finite() {
        return Err(MalformedReason::NonFinite(value.to_string()));
    }

    Ok(Some(Entry {
        word: word.to_string(),
        score,
    }))
}
