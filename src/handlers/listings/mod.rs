pub mod artists;
pub mod shows;
pub mod venues;

// Re-export handler functions for use in routing
pub use artists::create as artists_create;
pub use artists::delete as artists_delete;
pub use artists::get as artist_get;
pub use artists::list as artists_list;
pub use artists::search as artists_search;
pub use artists::update as artists_update;

pub use shows::create as shows_create;
pub use shows::list as shows_list;

pub use venues::create as venues_create;
pub use venues::delete as venues_delete;
pub use venues::get as venue_get;
pub use venues::list as venues_list;
pub use venues::search as venues_search;
pub use venues::update as venues_update;
