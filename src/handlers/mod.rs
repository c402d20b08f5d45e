// handlers/mod.rs - three access tiers
//
// Public (no identity) → Protected (resolved requestor, ownership checks)
// → Elevated (resolved requestor with the admin role)

pub mod elevated;
pub mod protected;
pub mod public;
pub mod utils;
