//! Per-request freshness values: [`Timestamp`] and [`Nonce`].

// self
use crate::_prelude::*;

const NONCE_BYTES: usize = 16;

/// Unix timestamp (whole seconds, UTC) placed in `oauth_timestamp`.
///
/// Freshness is enforced by the server only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);
impl Timestamp {
	/// Reads the current wall-clock time.
	pub fn now() -> Self {
		Self(OffsetDateTime::now_utc().unix_timestamp())
	}

	/// Wraps an explicit Unix timestamp.
	pub const fn from_unix(seconds: i64) -> Self {
		Self(seconds)
	}

	/// Returns the timestamp as Unix seconds.
	pub const fn unix(self) -> i64 {
		self.0
	}
}
impl Display for Timestamp {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		Display::fmt(&self.0, f)
	}
}

/// One-time token placed in `oauth_nonce`: 32 lowercase hex characters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Nonce(String);
impl Nonce {
	/// Draws a fresh nonce from the thread-local CSPRNG.
	pub fn random() -> Self {
		let bytes: [u8; NONCE_BYTES] = rand::random();

		Self(bytes.iter().map(|b| format!("{b:02x}")).collect())
	}

	/// Wraps an explicit nonce value, e.g. to reproduce a signature.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the nonce string.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for Nonce {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Display for Nonce {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
