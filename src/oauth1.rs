//! OAuth 1.0 signature builder (HMAC-SHA1, consumer-only).
//!
//! Signing is a pure computation over the consumer credentials, the HTTP method, the full request
//! URI, a [`Timestamp`], and a [`Nonce`]. [`authorization_header`] draws a fresh timestamp and
//! nonce for every call, while [`authorization_header_at`] accepts both explicitly so the result
//! is reproducible.
//!
//! The resulting [`AuthorizationHeader`] is sent verbatim as the value of the custom `OAuth`
//! request header.

pub mod encode;
pub mod nonce;
pub mod signer;

pub use encode::*;
pub use nonce::*;
pub use signer::*;

/// Name of the request header carrying the authorization string.
pub const OAUTH_HEADER: &str = "OAuth";
/// Signature method advertised in `oauth_signature_method`.
pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
/// Protocol version advertised in `oauth_version`.
pub const OAUTH_VERSION: &str = "1.0";
