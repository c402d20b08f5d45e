// handlers/public/auth/mod.rs - account registration and login

use serde::Deserialize;

pub mod login;    // POST /login
pub mod register; // POST /register

pub use login::login_post;
pub use register::register_post;

/// Body shared by `/register` and `/login`
#[derive(Debug, Deserialize)]
pub struct AuthInput {
    pub email: String,
    pub password: String,
}
