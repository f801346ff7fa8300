//! Consumer credentials used to sign every request.

pub mod credentials;
pub mod secret;

pub use credentials::*;
pub use secret::*;
