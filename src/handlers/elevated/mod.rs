// handlers/elevated/mod.rs - Handlers restricted to the admin role

pub mod users;

pub use users::*;
