use crate::model::session::QuizError;

/// Seconds a player gets per question.
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 30;

/// Points awarded for each correct answer, independent of time left.
pub const DEFAULT_POINTS_PER_CORRECT: u32 = 10;

/// Remaining seconds at or below which the countdown is shown as urgent.
pub const LOW_TIME_SECS: u32 = 10;

/// Scoring and timing rules for a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizRules {
    time_limit_secs: u32,
    points_per_correct: u32,
}

impl QuizRules {
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTimeLimit` if `time_limit_secs` is zero.
    pub fn new(time_limit_secs: u32, points_per_correct: u32) -> Result<Self, QuizError> {
        if time_limit_secs == 0 {
            return Err(QuizError::InvalidTimeLimit);
        }
        Ok(Self {
            time_limit_secs,
            points_per_correct,
        })
    }

    #[must_use]
    pub fn time_limit_secs(&self) -> u32 {
        self.time_limit_secs
    }

    #[must_use]
    pub fn points_per_correct(&self) -> u32 {
        self.points_per_correct
    }
}

impl Default for QuizRules {
    fn default() -> Self {
        Self {
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
            points_per_correct: DEFAULT_POINTS_PER_CORRECT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_constants() {
        let rules = QuizRules::default();
        assert_eq!(rules.time_limit_secs(), 30);
        assert_eq!(rules.points_per_correct(), 10);
    }

    #[test]
    fn zero_time_limit_is_rejected() {
        assert_eq!(QuizRules::new(0, 10), Err(QuizError::InvalidTimeLimit));
    }
}
