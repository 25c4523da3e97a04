pub mod auth;
pub mod output_cache;
pub mod response;

pub use auth::{authenticate, require_admin, require_authenticated, require_trusted_member};
pub use output_cache::output_cache;
pub use response::{ApiResponse, ApiResult};
