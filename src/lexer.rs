use std::iter::Peekable;
use std::str::CharIndices;

/// A whitespace-delimited word of the analyzed text, with its byte span.
///
/// No punctuation is stripped: `great!` and `great` are distinct tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub pos_start: usize,
    pub pos_end: usize,
}

impl<'a> Token<'a> {
    pub fn new(text: &'a str, pos_start: usize, pos_end: usize) -> Token<'a> {
        Token {
            text,
            pos_start,
            pos_end,
        }
    }

    /// The lower-cased form used for lexicon lookups.
    #[must_use]
    pub fn normalized(&self) -> String {
        self.text.to_lowercase()
    }
}

/// Splits text on runs of Unicode whitespace. Leading, trailing and repeated
/// whitespace never produce empty tokens.
pub struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    pub fn lex(&mut self) -> Vec<Token<'a>> {
        self.by_ref().collect()
    }

    fn skip_whitespace(&mut self) {
        while let Some(&(_, c)) = self.chars.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.chars.next();
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        self.skip_whitespace();
        let (start, _) = self.chars.next()?;

        let mut end = self.input.len();
        while let Some(&(i, c)) = self.chars.peek() {
            if c.is_whitespace() {
                end = i;
                break;
            }
            self.chars.next();
        }

        Some(Token::new(&self.input[start..end], start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(input: &str) -> Vec<&str> {
        Lexer::new(input).map(|t| t.text).collect()
    }

    #[test]
    fn test_mixed_whitespace() {
        assert_eq!(words("good  \n bad"), vec!["good", "bad"]);
        assert_eq!(words("\t good\r\nbad\t"), vec!["good", "bad"]);
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(words("").is_empty());
        assert!(words(" \n\t ").is_empty());
    }

    #[test]
    fn test_punctuation_is_kept() {
        assert_eq!(words("great! (great)"), vec!["great!", "(great)"]);
    }

    #[test]
    fn test_token_positions() {
        let tokens = Lexer::new("  héllo wörld").lex();
        assert_eq!(tokens[0], Token::new("héllo", 2, 8));
        assert_eq!(tokens[1].pos_start, 9);
        assert_eq!(tokens[1].pos_end, "  héllo wörld".len());
    }

    #[test]
    fn test_unicode_whitespace() {
        // U+00A0 no-break space and U+3000 ideographic space
        assert_eq!(words("good\u{a0}bad\u{3000}ok"), vec!["good", "bad", "ok"]);
    }

    #[test]
    fn test_normalized() {
        assert_eq!(Token::new("GoOd", 0, 4).normalized(), "good");
    }
}
