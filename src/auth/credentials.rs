//! Pre-provisioned OAuth 1.0 consumer key/secret pair.

// self
use crate::{_prelude::*, auth::ConsumerSecret};

/// Error returned when credential validation fails.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum CredentialsError {
	/// The value was empty or whitespace only.
	#[error("Consumer {part} cannot be empty.")]
	Empty {
		/// Which half of the pair failed (key, secret).
		part: &'static str,
	},
	/// The consumer key carries surrounding whitespace, which the server never issues.
	#[error("Consumer key contains leading or trailing whitespace.")]
	UntrimmedKey,
}

/// Static consumer credentials owned by a client for its whole lifetime.
///
/// There is no token half: every request is signed with an empty token secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
	consumer_key: String,
	consumer_secret: ConsumerSecret,
}
impl Credentials {
	/// Validates and wraps a consumer key/secret pair.
	pub fn new(
		consumer_key: impl Into<String>,
		consumer_secret: impl Into<String>,
	) -> Result<Self, CredentialsError> {
		let consumer_key = consumer_key.into();
		let consumer_secret = consumer_secret.into();

		if consumer_key.trim().is_empty() {
			return Err(CredentialsError::Empty { part: "key" });
		}
		if consumer_key.trim() != consumer_key {
			return Err(CredentialsError::UntrimmedKey);
		}
		if consumer_secret.trim().is_empty() {
			return Err(CredentialsError::Empty { part: "secret" });
		}

		Ok(Self { consumer_key, consumer_secret: ConsumerSecret::new(consumer_secret) })
	}

	/// Consumer key sent in clear as `oauth_consumer_key`.
	pub fn consumer_key(&self) -> &str {
		&self.consumer_key
	}

	/// Consumer secret used to derive the signing key.
	pub fn consumer_secret(&self) -> &ConsumerSecret {
		&self.consumer_secret
	}
}
impl Debug for Credentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credentials")
			.field("consumer_key", &self.consumer_key)
			.field("consumer_secret", &self.consumer_secret)
			.finish()
	}
}
