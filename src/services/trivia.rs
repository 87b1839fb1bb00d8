use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;
use validator::{Validate, ValidationErrors};

use crate::database::models::{Category, Question, QuestionFilter};
use crate::database::{Repository, Stores};
use crate::error::ApiError;
use crate::filter::paginate;
use crate::middleware::{not_blank, InputBody};
use crate::types::DbId;

/// Quiz category id meaning "every category"
pub const ALL_CATEGORIES: DbId = 0;

/// `{id: type}` map the quiz client renders
pub type CategoryMap = BTreeMap<DbId, String>;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewQuestion {
    #[validate(custom(function = "not_blank"))]
    pub question: String,
    #[validate(custom(function = "not_blank"))]
    pub answer: String,
    #[validate(range(min = 1))]
    pub category: DbId,
    #[validate(range(min = 1, max = 5))]
    pub difficulty: i32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SearchQuestions {
    #[serde(rename = "searchTerm")]
    pub search_term: String,
}

/// `POST /questions` carries either a search term or a new question
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum QuestionsRequest {
    Search(SearchQuestions),
    Create(NewQuestion),
}

impl Validate for QuestionsRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            QuestionsRequest::Search(search) => search.validate(),
            QuestionsRequest::Create(question) => question.validate(),
        }
    }
}

impl InputBody for QuestionsRequest {
    const UNPROCESSABLE: bool = true;
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct QuizCategory {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(deserialize_with = "id_from_number_or_text")]
    #[validate(range(min = 0))]
    pub id: DbId,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct QuizRequest {
    #[serde(default)]
    pub previous_questions: Vec<DbId>,
    #[validate(nested)]
    pub quiz_category: QuizCategory,
}

impl InputBody for QuizRequest {
    const UNPROCESSABLE: bool = true;
}

/// The quiz client sends category ids as numbers or numeric strings
fn id_from_number_or_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DbId, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(DbId),
        Text(String),
    }

    match Repr::deserialize(deserializer)? {
        Repr::Number(id) => Ok(id),
        Repr::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryList {
    pub categories: CategoryMap,
    pub total_categories: usize,
}

#[derive(Debug, Serialize)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub categories: CategoryMap,
    pub current_category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuestionList {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatedQuestion {
    pub created: DbId,
    pub total_questions: usize,
}

#[derive(Debug, Serialize)]
pub struct QuizTurn {
    /// `None` once every eligible question has been served
    pub question: Option<Question>,
}

#[derive(Clone)]
pub struct TriviaService {
    questions: Arc<dyn Repository<Question>>,
    categories: Arc<dyn Repository<Category>>,
}

impl TriviaService {
    pub fn new(stores: &Stores) -> Self {
        Self {
            questions: stores.questions.clone(),
            categories: stores.categories.clone(),
        }
    }

    async fn category_map(&self) -> Result<CategoryMap, ApiError> {
        Ok(self
            .categories
            .find_all(&())
            .await?
            .into_iter()
            .map(|c| (c.id, c.kind))
            .collect())
    }

    pub async fn categories(&self) -> Result<CategoryList, ApiError> {
        let categories = self.category_map().await?;
        Ok(CategoryList {
            total_categories: categories.len(),
            categories,
        })
    }

    /// One 10-question window of every question; an empty window is 404
    pub async fn list(&self, page: usize) -> Result<QuestionPage, ApiError> {
        let all = self.questions.find_all(&QuestionFilter::default()).await?;
        let window = paginate(&all, page)?;
        Ok(QuestionPage {
            questions: window.items,
            total_questions: window.total,
            categories: self.category_map().await?,
            current_category: None,
        })
    }

    /// Every question in `category_id`; unknown category is 404
    pub async fn in_category(&self, category_id: DbId) -> Result<QuestionList, ApiError> {
        let category = self
            .categories
            .find_by_id(category_id)
            .await?
            .ok_or_else(|| ApiError::not_found("resource not found"))?;
        let questions = self.questions.find_all(&QuestionFilter::category(category_id)).await?;
        Ok(QuestionList {
            total_questions: questions.len(),
            questions,
            current_category: Some(category.kind),
        })
    }

    /// Case-insensitive substring search; no matches is an empty list
    pub async fn search(&self, term: &str) -> Result<QuestionList, ApiError> {
        let questions = self.questions.find_all(&QuestionFilter::search(term)).await?;
        Ok(QuestionList {
            total_questions: questions.len(),
            questions,
            current_category: None,
        })
    }

    pub async fn create(&self, input: NewQuestion) -> Result<CreatedQuestion, ApiError> {
        if self.categories.find_by_id(input.category).await?.is_none() {
            return Err(ApiError::unprocessable(format!(
                "category {} does not exist",
                input.category
            )));
        }

        let created = self
            .questions
            .insert(Question {
                id: 0,
                question: input.question.trim().to_string(),
                answer: input.answer.trim().to_string(),
                category: input.category,
                difficulty: input.difficulty,
            })
            .await?;
        info!(id = created.id, category = created.category, "Created question");

        let total_questions = self.questions.find_all(&QuestionFilter::default()).await?.len();
        Ok(CreatedQuestion {
            created: created.id,
            total_questions,
        })
    }

    pub async fn delete(&self, id: DbId) -> Result<DbId, ApiError> {
        if !self.questions.delete(id).await? {
            return Err(ApiError::not_found("resource not found"));
        }
        info!(id, "Deleted question");
        Ok(id)
    }

    /// Questions still playable in this round: in the requested category (or
    /// any, for `ALL_CATEGORIES`) and not served before. Unknown category is 422.
    pub async fn quiz_candidates(&self, request: &QuizRequest) -> Result<Vec<Question>, ApiError> {
        let category_id = request.quiz_category.id;
        let filter = if category_id == ALL_CATEGORIES {
            QuestionFilter::default()
        } else {
            if self.categories.find_by_id(category_id).await?.is_none() {
                return Err(ApiError::unprocessable(format!(
                    "category {} does not exist",
                    category_id
                )));
            }
            QuestionFilter::category(category_id)
        };

        let previous: HashSet<DbId> = request.previous_questions.iter().copied().collect();
        Ok(self
            .questions
            .find_all(&filter)
            .await?
            .into_iter()
            .filter(|q| !previous.contains(&q.id))
            .collect())
    }

    pub async fn next_quiz_question<R: Rng + Send>(
        &self,
        request: &QuizRequest,
        rng: &mut R,
    ) -> Result<QuizTurn, ApiError> {
        let eligible = self.quiz_candidates(request).await?;
        Ok(QuizTurn {
            question: pick_question(&eligible, rng),
        })
    }
}

/// Uniform choice; `None` for an empty slice
pub fn pick_question<R: Rng + ?Sized>(eligible: &[Question], rng: &mut R) -> Option<Question> {
    eligible.choose(rng).cloned()
}
