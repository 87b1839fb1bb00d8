pub mod drinks;

// Re-export handler functions for use in routing
pub use drinks::create as drinks_create;
pub use drinks::delete as drinks_delete;
pub use drinks::detail as drinks_detail;
pub use drinks::list as drinks_list;
pub use drinks::update as drinks_update;
