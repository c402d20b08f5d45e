pub mod identity;
pub mod json;
pub mod response;

pub use identity::{Requestor, IDENTITY_HEADER};
pub use json::JsonBody;
pub use response::{ApiResponse, ApiResult};
