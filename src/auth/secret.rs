//! Consumer secret wrapper that redacts sensitive material.

// self
use crate::_prelude::*;

/// Redacted consumer secret keeping the signing key out of logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ConsumerSecret(String);
impl ConsumerSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner secret value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for ConsumerSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for ConsumerSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("ConsumerSecret").field(&"<redacted>").finish()
	}
}
impl Display for ConsumerSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
