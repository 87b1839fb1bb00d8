/// Shared types used across the codebase

/// Surrogate primary key used by every table with a generated id
pub type DbId = i64;

// Permission names carried in the `permissions` claim
pub const GET_DRINKS_DETAIL: &str = "get:drinks-detail";
pub const POST_DRINKS: &str = "post:drinks";
pub const PATCH_DRINKS: &str = "patch:drinks";
pub const DELETE_DRINKS: &str = "delete:drinks";
