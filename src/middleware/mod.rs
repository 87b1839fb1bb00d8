pub mod auth;
pub mod response;
pub mod validated;

pub use auth::{require_permission, PermissionGuard};
pub use response::{ApiResponse, ApiResult};
pub use validated::{not_blank, InputBody, ValidatedJson};
