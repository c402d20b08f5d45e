pub mod account;
pub mod location;

pub use account::{Account, Role};
pub use location::{Coordinates, LocationRecord, LocationUpdate, NewLocation};
