use std::ops::Index;
use std::sync::Arc;

use crate::model::question::Question;

/// Ordered, read-only collection of questions for one quiz.
///
/// Cloning is cheap; clones share the same questions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuizSet {
    questions: Arc<[Question]>,
}

impl QuizSet {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions: questions.into(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}

impl Index<usize> for QuizSet {
    type Output = Question;

    fn index(&self, index: usize) -> &Self::Output {
        &self.questions[index]
    }
}

impl FromIterator<Question> for QuizSet {
    fn from_iter<T: IntoIterator<Item = Question>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
