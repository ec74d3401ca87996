use chrono::{DateTime, Duration, Utc};

/// Rounded share of correct answers, `round(100 * correct / total)`.
///
/// Halves round up. Returns 0 for an empty quiz.
#[must_use]
pub fn percentage(correct: u32, total: usize) -> u32 {
    let Ok(total) = u64::try_from(total) else {
        return 0;
    };
    if total == 0 {
        return 0;
    }
    let correct = u64::from(correct).min(total);
    let rounded = (200 * correct + total) / (2 * total);
    u32::try_from(rounded).unwrap_or(100)
}

/// Feedback tier shown on the results screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceBand {
    Excellent,
    Good,
    Fair,
    NeedsPractice,
}

impl PerformanceBand {
    #[must_use]
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            90.. => Self::Excellent,
            70..=89 => Self::Good,
            50..=69 => Self::Fair,
            _ => Self::NeedsPractice,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent!",
            Self::Good => "Good Job!",
            Self::Fair => "Not Bad!",
            Self::NeedsPractice => "Keep Trying!",
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Excellent => "You're a quiz master! Keep up the great work.",
            Self::Good => "Well done! You have a solid understanding.",
            Self::Fair => "You're on the right track. Keep practicing!",
            Self::NeedsPractice => "Don't give up! Review the material and try again.",
        }
    }
}

/// Final result of a completed quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSummary {
    score: u32,
    correct_count: u32,
    total: usize,
    percentage: u32,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
}

impl QuizSummary {
    #[must_use]
    pub fn new(
        score: u32,
        correct_count: u32,
        total: usize,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            score,
            correct_count,
            total,
            percentage: percentage(correct_count, total),
            started_at,
            completed_at: completed_at.max(started_at),
        }
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn percentage(&self) -> u32 {
        self.percentage
    }

    #[must_use]
    pub fn band(&self) -> PerformanceBand {
        PerformanceBand::from_percentage(self.percentage)
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.completed_at - self.started_at
    }
}
