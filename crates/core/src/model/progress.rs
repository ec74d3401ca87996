use serde::{Deserialize, Serialize};

/// Snapshot of a quiz in progress, persisted under the `quizProgress` key.
///
/// `current_index` names the most recently resolved question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    #[serde(rename = "currentQuestionIndex")]
    pub current_index: usize,
    pub score: u32,
    #[serde(rename = "correctAnswers")]
    pub correct_count: u32,
}

impl Progress {
    /// Whether this snapshot could have been produced by a quiz over
    /// `total` questions scored at `points_per_correct`.
    #[must_use]
    pub fn is_consistent_with(&self, total: usize, points_per_correct: u32) -> bool {
        if self.current_index >= total {
            return false;
        }
        let resolved = self.current_index + 1;
        let Ok(correct) = usize::try_from(self.correct_count) else {
            return false;
        };
        correct <= resolved
            && self.correct_count.checked_mul(points_per_correct) == Some(self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_storage_keys() {
        let progress = Progress {
            current_index: 2,
            score: 20,
            correct_count: 2,
        };
        let json = serde_json::to_value(progress).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"currentQuestionIndex": 2, "score": 20, "correctAnswers": 2})
        );
    }

    #[test]
    fn consistency_checks_index_and_score() {
        let ok = Progress {
            current_index: 1,
            score: 20,
            correct_count: 2,
        };
        assert!(ok.is_consistent_with(3, 10));
        assert!(!ok.is_consistent_with(1, 10));
        assert!(!ok.is_consistent_with(3, 5));

        let too_many_correct = Progress {
            current_index: 0,
            score: 20,
            correct_count: 2,
        };
        assert!(!too_many_correct.is_consistent_with(3, 10));
    }
}
