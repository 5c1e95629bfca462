use crate::lexer::Lexer;
use crate::lexicon::Lexicon;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Decides which tokens take part in the average.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringPolicy {
    /// A token counts when its word is present in the lexicon, including
    /// words stored with a score of exactly `0.0`.
    #[default]
    PresenceAware,
    /// A token counts when its looked-up score is non-zero, so absent words
    /// and zero-valued words are both left out.
    ZeroAsAbsent,
}

impl FromStr for ScoringPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "presence" | "presence-aware" => Ok(ScoringPolicy::PresenceAware),
            "nonzero" | "zero-as-absent" => Ok(ScoringPolicy::ZeroAsAbsent),
            other => Err(format!(
                "unknown scoring policy `{other}`, expected `presence` or `nonzero`"
            )),
        }
    }
}

/// The result of scoring one text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Analysis {
    /// Mean score of the matched tokens, `0.0` when nothing matched.
    pub score: f64,
    pub token_count: usize,
    pub matched_count: usize,
    /// Sum of the matched scores.
    pub total: f64,
}

impl Analysis {
    /// Serializes the analysis into a pretty-printed JSON string.
    ///
    /// # Errors
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serializes the analysis into a YAML string.
    ///
    /// # Errors
    /// Returns a `serde_yaml::Error` if serialization fails.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

/// Scores `text` against `lexicon`.
///
/// The text is split on whitespace, each token is lower-cased and looked up,
/// and the matched scores are averaged. Unmatched tokens add nothing to the
/// sum or the count. The lexicon may still be loading; the result then
/// reflects whatever it holds at the time of each lookup.
pub fn analyze(text: &str, lexicon: &Lexicon, policy: ScoringPolicy) -> Analysis {
    let mut total = 0.0;
    let mut token_count = 0;
    let mut matched_count = 0;

    for token in Lexer::new(text) {
        token_count += 1;
        let word = token.normalized();
        let score = match policy {
            ScoringPolicy::PresenceAware => lexicon.get(&word),
            ScoringPolicy::ZeroAsAbsent => Some(lexicon.lookup(&word)).filter(|s| *s != 0.0),
        };
        if let Some(score) = score {
            total += score;
            matched_count += 1;
        }
    }

    let score = if matched_count > 0 {
        total / matched_count as f64
    } else {
        0.0
    };

    Analysis {
        score,
        token_count,
        matched_count,
        total,
    }
}

/// Average sentiment of `text` under the default [`ScoringPolicy`].
pub fn analyze_text(text: &str, lexicon: &Lexicon) -> f64 {
    analyze(text, lexicon, ScoringPolicy::default()).score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> Lexicon {
        let lexicon = Lexicon::new();
        lexicon.insert("good", 1.0);
        lexicon.insert("bad", -1.0);
        lexicon.insert("neutral", 0.0);
        lexicon
    }

    #[test]
    fn test_analysis_counts() {
        let analysis = analyze("good bad unknown good", &lexicon(), ScoringPolicy::PresenceAware);
        assert_eq!(analysis.token_count, 4);
        assert_eq!(analysis.matched_count, 3);
        assert_eq!(analysis.total, 1.0);
        assert!((analysis.score - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_entries_depend_on_policy() {
        let lexicon = lexicon();

        let aware = analyze("good neutral", &lexicon, ScoringPolicy::PresenceAware);
        assert_eq!(aware.matched_count, 2);
        assert_eq!(aware.score, 0.5);

        let lossy = analyze("good neutral", &lexicon, ScoringPolicy::ZeroAsAbsent);
        assert_eq!(lossy.matched_count, 1);
        assert_eq!(lossy.score, 1.0);
    }

    #[test]
    fn test_only_zero_matches() {
        let analysis = analyze("neutral neutral", &lexicon(), ScoringPolicy::PresenceAware);
        assert_eq!(analysis.matched_count, 2);
        assert_eq!(analysis.score, 0.0);
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("presence".parse(), Ok(ScoringPolicy::PresenceAware));
        assert_eq!("zero-as-absent".parse(), Ok(ScoringPolicy::ZeroAsAbsent));
        assert!("mean".parse::<ScoringPolicy>().is_err());
    }

    #[test]
    fn test_analysis_to_json() {
        let analysis = analyze("good", &lexicon(), ScoringPolicy::PresenceAware);
        let json: serde_json::Value = serde_json::from_str(&analysis.to_json().unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "score": 1.0,
                "token_count": 1,
                "matched_count": 1,
                "total": 1.0,
            })
        );
    }
}
