// self
use crate::_prelude::*;

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.cardinity.com/v1/";

/// Errors raised while constructing or validating a [`ClientConfig`].
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum ClientConfigError {
	/// Base URL uses a scheme other than HTTP(S).
	#[error("The base URL must use HTTP or HTTPS: {url}.")]
	UnsupportedScheme {
		/// URL that failed validation.
		url: String,
	},
	/// Base URL uses plain HTTP without opting in.
	#[error("The base URL must use HTTPS: {url}.")]
	InsecureBaseUrl {
		/// URL that failed validation.
		url: String,
	},
	/// Base URL carries a query or fragment that resource paths cannot extend.
	#[error("The base URL must not carry a query or fragment: {url}.")]
	BaseUrlNotAPrefix {
		/// URL that failed validation.
		url: String,
	},
	/// A zero timeout would fail every call.
	#[error("The default timeout must be greater than zero.")]
	ZeroTimeout,
}

/// Immutable client settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
	/// API root that resource paths are joined onto; always ends with `/`.
	pub base_url: Url,
	/// Default deadline applied to calls that do not pass their own.
	pub timeout: Option<StdDuration>,
	/// Emit a debug event (status plus body preview) for every response.
	pub debug: bool,
}
impl ClientConfig {
	/// Creates a new builder seeded with production defaults.
	pub fn builder() -> ClientConfigBuilder {
		ClientConfigBuilder::default()
	}

	/// Validates invariants for the configuration.
	fn validate(&self, allow_insecure_http: bool) -> Result<(), ClientConfigError> {
		let url = &self.base_url;

		match url.scheme() {
			"https" => {},
			"http" if allow_insecure_http => {},
			"http" => return Err(ClientConfigError::InsecureBaseUrl { url: url.to_string() }),
			_ => return Err(ClientConfigError::UnsupportedScheme { url: url.to_string() }),
		}

		if url.query().is_some() || url.fragment().is_some() || url.cannot_be_a_base() {
			return Err(ClientConfigError::BaseUrlNotAPrefix { url: url.to_string() });
		}
		if self.timeout.is_some_and(|timeout| timeout.is_zero()) {
			return Err(ClientConfigError::ZeroTimeout);
		}

		Ok(())
	}
}
impl Default for ClientConfig {
	fn default() -> Self {
		Self { base_url: default_base_url(), timeout: None, debug: false }
	}
}

/// Builder for [`ClientConfig`] values.
#[derive(Debug)]
pub struct ClientConfigBuilder {
	/// API root; defaults to [`DEFAULT_BASE_URL`].
	pub base_url: Url,
	/// Default per-call deadline.
	pub timeout: Option<StdDuration>,
	/// Debug response events.
	pub debug: bool,
	/// Accept a plain `http` base URL (local mocks and proxies).
	pub allow_insecure_http: bool,
}
impl ClientConfigBuilder {
	/// Overrides the API root.
	pub fn base_url(mut self, url: Url) -> Self {
		self.base_url = url;

		self
	}

	/// Sets the default per-call deadline.
	pub fn timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Toggles debug response events.
	pub fn debug(mut self, debug: bool) -> Self {
		self.debug = debug;

		self
	}

	/// Allows a plain `http` base URL.
	pub fn allow_insecure_http(mut self, allow: bool) -> Self {
		self.allow_insecure_http = allow;

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<ClientConfig, ClientConfigError> {
		let mut base_url = self.base_url;

		ensure_trailing_slash(&mut base_url);

		let config = ClientConfig { base_url, timeout: self.timeout, debug: self.debug };

		config.validate(self.allow_insecure_http)?;

		Ok(config)
	}
}
impl Default for ClientConfigBuilder {
	fn default() -> Self {
		Self {
			base_url: default_base_url(),
			timeout: None,
			debug: false,
			allow_insecure_http: false,
		}
	}
}

/// Makes `url` a directory URL so relative joins keep its last path segment.
pub(crate) fn ensure_trailing_slash(url: &mut Url) {
	if !url.path().ends_with('/') {
		let path = format!("{}/", url.path());

		url.set_path(&path);
	}
}

fn default_base_url() -> Url {
	Url::parse(DEFAULT_BASE_URL).expect("Default base URL constant should parse.")
}
