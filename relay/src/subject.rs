//! Hierarchical subjects: dot-separated token strings with `*`/`>` wildcard
//! matching.

// Layer 1: Standard library imports
use std::fmt::{self, Display};

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Layer 3: Internal module imports
// (none)

/// Errors raised while parsing or validating a subject/pattern string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubjectError {
    /// The subject string was empty.
    #[error("subject must not be empty")]
    Empty,

    /// One of the dot-separated tokens was empty (e.g. `a..b`).
    #[error("subject contains an empty token: {0:?}")]
    EmptyToken(String),

    /// A token contained a character outside `[A-Za-z0-9_-]` (or, for
    /// patterns, outside that set plus `*`/`>`).
    #[error("subject token {token:?} contains invalid character {ch:?}")]
    InvalidCharacter {
        /// The offending token.
        token: String,
        /// The offending character.
        ch: char,
    },

    /// A concrete subject (endpoint, envelope target) contained a wildcard.
    #[error("concrete subject must not contain wildcards: {0:?}")]
    WildcardInConcreteSubject(String),

    /// `>` appeared somewhere other than as the final token of a pattern.
    #[error("'>' wildcard is only valid as the last token of a pattern: {0:?}")]
    GreaterNotLast(String),
}

/// A validated subject string — either concrete (no wildcards) or a pattern
/// (may contain `*`/`>`).
///
/// Subjects are cheap, immutable, and compared by their canonical string
/// form; cloning is a `String` clone (kept intentionally simple rather than
/// an `Arc<str>`, since subjects are typically short-lived per envelope).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Subject(String);

impl Subject {
    /// Parse and validate a concrete subject (no `*`/`>` tokens allowed).
    pub fn concrete(raw: impl Into<String>) -> Result<Self, SubjectError> {
        let raw = raw.into();
        let tokens = Self::validate_tokens(&raw)?;
        if tokens.iter().any(|t| *t == "*" || *t == ">") {
            return Err(SubjectError::WildcardInConcreteSubject(raw));
        }
        Ok(Self(raw))
    }

    /// Parse and validate a subscription/access-rule pattern, which may
    /// contain `*` (single token) and `>` (one-or-more, last token only).
    pub fn pattern(raw: impl Into<String>) -> Result<Self, SubjectError> {
        let raw = raw.into();
        let tokens = Self::validate_tokens(&raw)?;
        if let Some(pos) = tokens.iter().position(|t| *t == ">") {
            if pos != tokens.len() - 1 {
                return Err(SubjectError::GreaterNotLast(raw));
            }
        }
        Ok(Self(raw))
    }

    fn validate_tokens(raw: &str) -> Result<Vec<&str>, SubjectError> {
        if raw.is_empty() {
            return Err(SubjectError::Empty);
        }
        let tokens: Vec<&str> = raw.split('.').collect();
        for token in &tokens {
            if token.is_empty() {
                return Err(SubjectError::EmptyToken(raw.to_string()));
            }
            if *token == "*" || *token == ">" {
                continue;
            }
            if let Some(ch) = token
                .chars()
                .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
            {
                return Err(SubjectError::InvalidCharacter {
                    token: (*token).to_string(),
                    ch,
                });
            }
        }
        Ok(tokens)
    }

    /// Borrow the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into dot-separated tokens.
    pub fn tokens(&self) -> Vec<&str> {
        self.0.split('.').collect()
    }

    /// Whether this subject contains any wildcard token.
    pub fn is_pattern(&self) -> bool {
        self.tokens().iter().any(|t| *t == "*" || *t == ">")
    }

    /// Does `self` (treated as a pattern) match the given concrete subject?
    ///
    /// Matching rule: literal per-token comparison; `*` matches
    /// exactly one token; `>` matches one-or-more remaining tokens and must
    /// be the pattern's last token.
    pub fn matches(&self, concrete: &Subject) -> bool {
        let pattern_tokens = self.tokens();
        let subject_tokens = concrete.tokens();
        Self::match_tokens(&pattern_tokens, &subject_tokens)
    }

    fn match_tokens(pattern: &[&str], subject: &[&str]) -> bool {
        match pattern.first() {
            None => subject.is_empty(),
            Some(&">") => !subject.is_empty(),
            Some(&"*") => {
                !subject.is_empty() && Self::match_tokens(&pattern[1..], &subject[1..])
            }
            Some(head) => {
                !subject.is_empty()
                    && *head == subject[0]
                    && Self::match_tokens(&pattern[1..], &subject[1..])
            }
        }
    }
}

impl Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Subject {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concrete_subject_accepts_valid() {
        let s = Subject::concrete("relay.human.telegram.12345").unwrap();
        assert_eq!(s.as_str(), "relay.human.telegram.12345");
    }

    #[test]
    fn test_concrete_rejects_wildcard() {
        let err = Subject::concrete("relay.agent.*").unwrap_err();
        assert!(matches!(err, SubjectError::WildcardInConcreteSubject(_)));
    }

    #[test]
    fn test_empty_subject_rejected() {
        assert_eq!(Subject::concrete("").unwrap_err(), SubjectError::Empty);
    }

    #[test]
    fn test_empty_token_rejected() {
        let err = Subject::concrete("relay..agent").unwrap_err();
        assert!(matches!(err, SubjectError::EmptyToken(_)));
    }

    #[test]
    fn test_invalid_character_rejected() {
        let err = Subject::concrete("relay.agent.sess#1").unwrap_err();
        assert!(matches!(err, SubjectError::InvalidCharacter { .. }));
    }

    #[test]
    fn test_pattern_allows_star_and_greater() {
        assert!(Subject::pattern("relay.agent.*").is_ok());
        assert!(Subject::pattern("relay.agent.>").is_ok());
    }

    #[test]
    fn test_greater_must_be_last() {
        let err = Subject::pattern("relay.>.agent").unwrap_err();
        assert!(matches!(err, SubjectError::GreaterNotLast(_)));
    }

    #[test]
    fn test_star_matches_exactly_one_token() {
        let pattern = Subject::pattern("relay.agent.*").unwrap();
        let hit = Subject::concrete("relay.agent.sess1").unwrap();
        let miss = Subject::concrete("relay.agent.sess1.extra").unwrap();
        assert!(pattern.matches(&hit));
        assert!(!pattern.matches(&miss));
    }

    #[test]
    fn test_star_does_not_match_across_dots() {
        let pattern = Subject::pattern("relay.agent.*").unwrap();
        let miss = Subject::concrete("relay.agent.sess1.sub").unwrap();
        assert!(!pattern.matches(&miss));
    }

    #[test]
    fn test_greater_matches_one_or_more_remaining() {
        let pattern = Subject::pattern("relay.system.pulse.>").unwrap();
        assert!(pattern.matches(&Subject::concrete("relay.system.pulse.abc").unwrap()));
        assert!(pattern.matches(&Subject::concrete("relay.system.pulse.abc.response").unwrap()));
    }

    #[test]
    fn test_greater_requires_at_least_one_remaining_token() {
        let pattern = Subject::pattern("a.b.>").unwrap();
        assert!(!pattern.matches(&Subject::concrete("a.b").unwrap()));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let pattern = Subject::pattern("relay.Agent.*").unwrap();
        assert!(!pattern.matches(&Subject::concrete("relay.agent.sess1").unwrap()));
    }

    #[test]
    fn test_concrete_subject_as_pattern_is_equality() {
        let pattern = Subject::pattern("relay.agent.sess1").unwrap();
        assert!(pattern.matches(&Subject::concrete("relay.agent.sess1").unwrap()));
        assert!(!pattern.matches(&Subject::concrete("relay.agent.sess2").unwrap()));
    }

    #[test]
    fn test_is_pattern_detection() {
        assert!(!Subject::concrete("relay.agent.sess1").unwrap().is_pattern());
        assert!(Subject::pattern("relay.agent.*").unwrap().is_pattern());
        assert!(Subject::pattern("relay.agent.>").unwrap().is_pattern());
    }

    #[test]
    fn test_display_roundtrip() {
        let s = Subject::concrete("relay.agent.sess1").unwrap();
        assert_eq!(format!("{s}"), "relay.agent.sess1");
    }
}
