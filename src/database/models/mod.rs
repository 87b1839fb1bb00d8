pub mod artist;
pub mod category;
pub mod drink;
pub mod genres;
pub mod question;
pub mod show;
pub mod venue;

pub use artist::{Artist, ArtistFilter};
pub use category::Category;
pub use drink::{Drink, DrinkShort, Ingredient, Recipe};
pub use question::{Question, QuestionFilter};
pub use show::{Show, ShowFilter};
pub use venue::{Venue, VenueFilter};
