pub mod drinks;
pub mod listings;
pub mod trivia;

pub use drinks::DrinkService;
pub use listings::ListingService;
pub use trivia::TriviaService;
