// handlers/public/mod.rs - Public handlers (no identity required)
//
// Registration, login, the location listing and service endpoints.

pub mod auth;
pub mod locations;
pub mod service;

pub use auth::*;
pub use locations::locations_get;
pub use service::{health, root};
