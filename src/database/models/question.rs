use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::repository::Entity;
use crate::filter::contains_ignore_case;
use crate::types::DbId;

/// A trivia question. Serializes to the five-field shape the quiz client expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: DbId,
    pub question: String,
    pub answer: String,
    pub category: DbId,
    pub difficulty: i32,
}

/// `find_all` criteria for questions. Both fields unset selects every question.
#[derive(Debug, Clone, Default)]
pub struct QuestionFilter {
    /// Case-insensitive substring of the question text
    pub search: Option<String>,
    pub category: Option<DbId>,
}

impl QuestionFilter {
    pub fn search(term: impl Into<String>) -> Self {
        Self { search: Some(term.into()), category: None }
    }

    pub fn category(id: DbId) -> Self {
        Self { search: None, category: Some(id) }
    }
}

impl Entity for Question {
    type Id = DbId;
    type Filter = QuestionFilter;

    const KIND: &'static str = "question";

    fn id(&self) -> DbId {
        self.id
    }

    fn assign_id(&mut self, generated: i64) {
        self.id = generated;
    }

    fn matches(&self, filter: &QuestionFilter) -> bool {
        let in_category = filter.category.map_or(true, |c| c == self.category);
        let in_search = filter
            .search
            .as_deref()
            .map_or(true, |term| contains_ignore_case(&self.question, term));
        in_category && in_search
    }
}
