//! Cardinity API client core: OAuth 1.0 (HMAC-SHA1) request signing plus a signed request
//! executor that classifies every response into a decoded payload, a structured API error, or
//! an opaque failure.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod http;
pub mod oauth1;
pub mod obs;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::Credentials,
		client::{Client, ClientConfig},
		http::ReqwestHttpClient,
	};

	/// Consumer key shared by the test fixtures.
	pub const TEST_CONSUMER_KEY: &str = "test_key";
	/// Consumer secret shared by the test fixtures.
	pub const TEST_CONSUMER_SECRET: &str = "yasd2aw/ASd&fwer";

	/// Builds the fixture credentials used across integration tests.
	pub fn test_credentials() -> Credentials {
		Credentials::new(TEST_CONSUMER_KEY, TEST_CONSUMER_SECRET)
			.expect("Test credentials fixture should be valid.")
	}

	/// Builds a client configuration pointing at a local (plain HTTP) mock server.
	pub fn test_config(base_url: &str) -> ClientConfig {
		let base_url = Url::parse(base_url).expect("Mock server base URL should parse successfully.");

		ClientConfig::builder()
			.base_url(base_url)
			.allow_insecure_http(true)
			.debug(true)
			.build()
			.expect("Mock server client configuration should build successfully.")
	}

	/// Constructs a reqwest-backed [`Client`] talking to the mock server at `base_url`.
	pub fn build_reqwest_test_client(base_url: &str) -> Client<ReqwestHttpClient> {
		Client::with_config(test_credentials(), test_config(base_url))
			.expect("Reqwest test client should build successfully.")
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
		time::Duration as StdDuration,
	};

	pub use ::http::{Method, StatusCode};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use ::http as http_types;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
