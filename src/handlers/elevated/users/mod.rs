// handlers/elevated/users/mod.rs - account management, admin role required

pub mod delete;      // DELETE /users/:id
pub mod list;        // GET /users
pub mod update_role; // PUT /users/:id/role

pub use delete::user_delete;
pub use list::users_get;
pub use update_role::user_role_put;

use crate::access::require_admin;
use crate::database::models::Account;
use crate::error::ApiError;

pub(crate) fn admin_only(requestor: &Account, action: &str) -> Result<(), ApiError> {
    if require_admin(requestor.role).is_allowed() {
        return Ok(());
    }
    tracing::warn!("{} attempted admin action '{}'", requestor.email, action);
    Err(ApiError::forbidden("Admins only"))
}
