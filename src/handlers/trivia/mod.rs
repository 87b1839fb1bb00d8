pub mod categories;
pub mod questions;
pub mod quizzes;

// Re-export handler functions for use in routing
pub use categories::get as categories_get;
pub use categories::questions as category_questions;
pub use questions::delete as questions_delete;
pub use questions::get as questions_get;
pub use questions::post as questions_post;
pub use quizzes::post as quizzes_post;
