//! Prompt text submitted by users.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Curated prompts offered to users who need inspiration.
pub const PROMPT_SUGGESTIONS: [&str; 6] = [
    "A modern portfolio website for a graphic designer",
    "An e-commerce store for handmade jewelry",
    "A landing page for a fitness coaching service",
    "A blog website about sustainable living",
    "A restaurant website with online menu",
    "A tech startup landing page",
];

/// Validation errors for [`PromptText`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PromptValidationError {
    #[error("prompt must not be empty")]
    Empty,
}

/// Natural-language description of the site to generate.
///
/// ## Invariants
/// - Never empty; surrounding whitespace is stripped on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PromptText(String);

impl PromptText {
    /// Trim and validate raw prompt input.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, PromptValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(PromptValidationError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Number of characters, as shown under the prompt box.
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl AsRef<str> for PromptText {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PromptText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<PromptText> for String {
    fn from(value: PromptText) -> Self {
        value.0
    }
}

impl TryFrom<String> for PromptText {
    type Error = PromptValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\n\t ")]
    fn blank_prompts_are_rejected(#[case] raw: &str) {
        assert_eq!(PromptText::new(raw), Err(PromptValidationError::Empty));
    }

    #[rstest]
    fn prompts_are_trimmed() {
        let prompt = PromptText::new("  A bakery site \n").expect("valid prompt");
        assert_eq!(prompt.as_ref(), "A bakery site");
        assert_eq!(prompt.char_count(), 13);
    }

    #[rstest]
    fn every_suggestion_is_a_valid_prompt() {
        for suggestion in PROMPT_SUGGESTIONS {
            let prompt = PromptText::new(suggestion).expect("suggestion is valid");
            assert_eq!(prompt.as_ref(), suggestion);
        }
    }
}
