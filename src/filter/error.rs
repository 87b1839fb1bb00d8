use thiserror::Error;

use crate::error::ApiError;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid page: {0}")]
    InvalidPage(String),

    #[error("Page {0} is out of range")]
    PageOutOfRange(usize),
}

impl From<FilterError> for ApiError {
    fn from(err: FilterError) -> Self {
        match err {
            FilterError::InvalidPage(_) => ApiError::validation(err.to_string()),
            FilterError::PageOutOfRange(_) => ApiError::not_found("resource not found"),
        }
    }
}
