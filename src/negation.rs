// WHY: chunk text and trigger strings are checked against the same cue set, so the
// compiled matcher is built once and shared by the library and the matcher

use regex_automata::meta::{BuildError, Regex};
use regex_automata::util::syntax;

/// Words and contractions that mark negated phrasing
pub const NEGATION_CUES: &[&str] = &["not", "no", "never", "don't", "doesn't", "won't", "cannot"];

/// Word-bounded, case-insensitive matcher for [`NEGATION_CUES`]
#[derive(Debug, Clone)]
pub struct NegationCues {
    regex: Regex,
}

impl NegationCues {
    pub fn new() -> Result<Self, BuildError> {
        let pattern = format!(r"\b({})\b", NEGATION_CUES.join("|"));
        let regex = Regex::builder()
            .syntax(syntax::Config::new().case_insensitive(true))
            .build(&pattern)?;
        Ok(Self { regex })
    }

    /// True when `text` contains any cue as a whole word
    pub fn is_negated(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}
