use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("a question needs at least 2 options, got {count}")]
    TooFewOptions { count: usize },

    #[error("option {index} is empty")]
    EmptyOption { index: usize },

    #[error("correct option {correct} is out of range for {count} options")]
    CorrectOutOfRange { correct: usize, count: usize },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// Minimum number of options a multiple-choice question must offer.
pub const MIN_OPTIONS: usize = 2;

/// A single multiple-choice question.
///
/// Immutable once built; `correct_option` is always a valid index into
/// `options`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    options: Vec<String>,
    correct_option: usize,
}

impl Question {
    /// Validate and build a question.
    ///
    /// The prompt and options are trimmed; blank values are rejected.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt is blank, there are fewer than
    /// two options, an option is blank, or `correct_option` is out of range.
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_option: usize,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into().trim().to_string();
        if prompt.is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }

        if options.len() < MIN_OPTIONS {
            return Err(QuestionError::TooFewOptions {
                count: options.len(),
            });
        }

        let options = options
            .into_iter()
            .enumerate()
            .map(|(index, option)| {
                let option = option.trim().to_string();
                if option.is_empty() {
                    Err(QuestionError::EmptyOption { index })
                } else {
                    Ok(option)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        if correct_option >= options.len() {
            return Err(QuestionError::CorrectOutOfRange {
                correct: correct_option,
                count: options.len(),
            });
        }

        Ok(Self {
            prompt,
            options,
            correct_option,
        })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn correct_option(&self) -> usize {
        self.correct_option
    }

    #[must_use]
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_option
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn builds_valid_question() {
        let question = Question::new("  2+2?  ", opts(&["3", " 4 ", "5"]), 1).unwrap();
        assert_eq!(question.prompt(), "2+2?");
        assert_eq!(question.options()[1], "4");
        assert_eq!(question.option_count(), 3);
        assert!(question.is_correct(1));
        assert!(!question.is_correct(0));
    }

    #[test]
    fn rejects_blank_prompt() {
        let err = Question::new("   ", opts(&["a", "b"]), 0).unwrap_err();
        assert_eq!(err, QuestionError::EmptyPrompt);
    }

    #[test]
    fn rejects_single_option() {
        let err = Question::new("q", opts(&["only"]), 0).unwrap_err();
        assert_eq!(err, QuestionError::TooFewOptions { count: 1 });
    }

    #[test]
    fn rejects_blank_option() {
        let err = Question::new("q", opts(&["a", " "]), 0).unwrap_err();
        assert_eq!(err, QuestionError::EmptyOption { index: 1 });
    }

    #[test]
    fn rejects_correct_index_past_end() {
        let err = Question::new("q", opts(&["a", "b"]), 2).unwrap_err();
        assert_eq!(
            err,
            QuestionError::CorrectOutOfRange {
                correct: 2,
                count: 2
            }
        );
    }
}
