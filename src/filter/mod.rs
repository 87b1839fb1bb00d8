pub mod error;
pub mod page;
pub mod search;

pub use error::FilterError;
pub use page::{paginate, Page, PageQuery, PAGE_SIZE};
pub use search::contains_ignore_case;
