// handlers/protected/mod.rs - Handlers that need a resolved requestor
//
// Identity comes from the `Requestor` extractor (bearer token or the
// `X-User-Email` header); ownership is checked per resource.

pub mod locations;

pub use locations::*;
