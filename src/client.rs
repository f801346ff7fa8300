//! Signed request client: credentials, configuration, request preparation, and execution.
//!
//! A [`Client`] owns its immutable [`Credentials`] for its whole lifetime and shares nothing
//! mutable between calls, so a single instance (or its clones) can drive any number of
//! concurrent requests. Each call signs with a fresh timestamp and nonce.

mod config;
mod execute;

pub use config::*;

// self
use crate::{
	_prelude::*,
	auth::Credentials,
	error::ConfigError,
	http::{HttpRequest, HttpTransport},
	obs::LogDispatch,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestCardinity = Client<ReqwestHttpClient>;

/// Signs and executes requests against the Cardinity API.
pub struct Client<T>
where
	T: HttpTransport,
{
	/// HTTP transport used for every outbound request.
	pub transport: Arc<T>,
	/// Validated client settings.
	pub config: ClientConfig,
	credentials: Credentials,
	log: LogDispatch,
}
impl<T> Client<T>
where
	T: HttpTransport,
{
	/// Creates a client that reuses the caller-provided transport.
	pub fn with_transport(
		credentials: Credentials,
		config: ClientConfig,
		transport: impl Into<Arc<T>>,
	) -> Self {
		Self { transport: transport.into(), config, credentials, log: LogDispatch::default() }
	}

	/// Routes this client's spans and events to `log` instead of the ambient dispatcher.
	pub fn with_log_dispatch(mut self, log: LogDispatch) -> Self {
		self.log = log;

		self
	}

	/// Consumer credentials every request is signed with.
	pub fn credentials(&self) -> &Credentials {
		&self.credentials
	}

	/// Resolves a resource path against the configured base URL.
	///
	/// Leading slashes are ignored so `"/payments"` and `"payments"` both stay under the base
	/// path. The base path is treated as a directory even when it lacks a trailing slash.
	pub fn resolve(&self, path: &str) -> Result<Url> {
		let mut base = self.config.base_url.clone();

		config::ensure_trailing_slash(&mut base);

		base.join(path.trim_start_matches('/'))
			.map_err(|source| ConfigError::InvalidPath { path: path.to_owned(), source }.into())
	}

	/// Prepares a request with an empty body.
	pub fn prepare(&self, method: Method, path: &str) -> Result<HttpRequest> {
		self.build_request(method, path, Vec::new())
	}

	/// Prepares a request whose body is `body` serialized as JSON.
	pub fn prepare_json<B>(&self, method: Method, path: &str, body: &B) -> Result<HttpRequest>
	where
		B: ?Sized + Serialize,
	{
		let payload = serde_json::to_vec(body).map_err(ConfigError::RequestBody)?;

		self.build_request(method, path, payload)
	}

	fn build_request(&self, method: Method, path: &str, body: Vec<u8>) -> Result<HttpRequest> {
		let url = self.resolve(path)?;
		let request = ::http::Request::builder()
			.method(method)
			.uri(url.as_str())
			.body(body)
			.map_err(ConfigError::from)?;

		Ok(request)
	}
}
#[cfg(feature = "reqwest")]
impl Client<ReqwestHttpClient> {
	/// Creates a production client for the provided consumer key/secret.
	pub fn new(
		consumer_key: impl Into<String>,
		consumer_secret: impl Into<String>,
	) -> Result<Self> {
		let credentials =
			Credentials::new(consumer_key, consumer_secret).map_err(ConfigError::from)?;

		Self::with_config(credentials, ClientConfig::default())
	}

	/// Creates a client with explicit settings, provisioning its own reqwest transport.
	pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
		let client = ReqwestClient::builder().build().map_err(ConfigError::from)?;

		Ok(Self::with_transport(credentials, config, ReqwestHttpClient::with_client(client)))
	}
}
impl<T> Clone for Client<T>
where
	T: HttpTransport,
{
	fn clone(&self) -> Self {
		Self {
			transport: self.transport.clone(),
			config: self.config.clone(),
			credentials: self.credentials.clone(),
			log: self.log.clone(),
		}
	}
}
impl<T> Debug for Client<T>
where
	T: HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Client")
			.field("config", &self.config)
			.field("consumer_key", &self.credentials.consumer_key())
			.field("log_injected", &self.log.is_injected())
			.finish()
	}
}
