//! Signed request execution and response classification.
//!
//! Every call follows the same pipeline: sign the prepared request, send it, then classify the
//! response by status:
//!
//! - `>= 400`: the body is decoded as an [`ApiError`]; a body that is not one becomes
//!   [`Error::Unexpected`] carrying only the status line.
//! - `< 400`: the body is returned as raw bytes or decoded into the requested type, a decode
//!   failure becoming [`Error::Decode`].
//!
//! Bodies are consumed by value, so the response resource is released exactly once on every
//! branch, and dropping the returned future cancels the call.

// crates.io
use ::http::header::{CONTENT_TYPE, HeaderName, HeaderValue};
// self
use crate::{
	_prelude::*,
	api::ApiError,
	client::Client,
	error::{ConfigError, DecodeError, TransportError},
	http::{HttpRequest, HttpTransport, ResponseBody},
	oauth1::{self, OAUTH_HEADER},
	obs::{self, RequestOutcome, RequestSpan},
};

impl<T> Client<T>
where
	T: HttpTransport,
{
	/// Executes `request` and returns the success body unmodified.
	///
	/// Uses [`ClientConfig::timeout`](crate::client::ClientConfig::timeout) as the deadline when
	/// one is configured.
	pub async fn execute_raw(&self, request: HttpRequest) -> Result<Vec<u8>> {
		self.execute_with(request, self.config.timeout, |body| Ok(body)).await
	}

	/// Executes `request` and decodes the success body as JSON into `D`.
	///
	/// Uses [`ClientConfig::timeout`](crate::client::ClientConfig::timeout) as the deadline when
	/// one is configured.
	pub async fn execute_json<D>(&self, request: HttpRequest) -> Result<D>
	where
		D: DeserializeOwned,
	{
		self.execute_with(request, self.config.timeout, decode_json).await
	}

	/// Same as [`execute_raw`](Self::execute_raw), failing with
	/// [`TransportError::DeadlineExceeded`] once `deadline` elapses.
	///
	/// Deadlines are driven by the Tokio timer, so the call must run inside a Tokio runtime.
	pub async fn execute_raw_within(
		&self,
		request: HttpRequest,
		deadline: StdDuration,
	) -> Result<Vec<u8>> {
		self.execute_with(request, Some(deadline), |body| Ok(body)).await
	}

	/// Same as [`execute_json`](Self::execute_json), failing with
	/// [`TransportError::DeadlineExceeded`] once `deadline` elapses.
	///
	/// Deadlines are driven by the Tokio timer, so the call must run inside a Tokio runtime.
	pub async fn execute_json_within<D>(
		&self,
		request: HttpRequest,
		deadline: StdDuration,
	) -> Result<D>
	where
		D: DeserializeOwned,
	{
		self.execute_with(request, Some(deadline), decode_json).await
	}

	async fn execute_with<O, F>(
		&self,
		request: HttpRequest,
		deadline: Option<StdDuration>,
		decode: F,
	) -> Result<O>
	where
		F: FnOnce(Vec<u8>) -> Result<O>,
	{
		let method = request.method().clone();
		let path = request.uri().path().to_owned();

		self.log
			.scope(async move {
				let span = RequestSpan::new(&method, &path);
				let call = async { self.dispatch(request, &span).await.and_then(decode) };
				let result = span
					.instrument(async move {
						match deadline {
							Some(deadline) => tokio::time::timeout(deadline, call)
								.await
								.unwrap_or_else(|_| {
									Err(TransportError::DeadlineExceeded { deadline }.into())
								}),
							None => call.await,
						}
					})
					.await;
				let outcome = RequestOutcome::of(&result);

				span.record_outcome(outcome);
				obs::record_request_outcome(outcome);

				result
			})
			.await
	}

	/// Signs, sends, and classifies; returns the body of a successful response.
	async fn dispatch(&self, mut request: HttpRequest, span: &RequestSpan) -> Result<Vec<u8>> {
		self.sign(&mut request)?;

		let response = self.transport.send(request).await.map_err(TransportError::network)?;
		let status = response.status();
		let body = response.into_body();

		span.record_status(status);

		if status.as_u16() >= 400 {
			// An unreadable error body is as unusable as a malformed one.
			let bytes = body.collect().await.ok();
			let bytes = bytes.as_deref().unwrap_or_default();

			return Err(match ApiError::from_response(status, bytes) {
				Some(api_error) => {
					if self.config.debug {
						obs::debug_response(status, bytes);
					}

					api_error.into()
				},
				None => {
					if self.config.debug {
						obs::debug_withheld_response(status, bytes.len());
					}

					Error::Unexpected { status }
				},
			});
		}

		let bytes = body.collect().await.map_err(TransportError::body)?;

		if self.config.debug {
			obs::debug_response(status, &bytes);
		}

		Ok(bytes)
	}

	/// Stamps the JSON content type and a freshly signed `OAuth` header onto `request`.
	fn sign(&self, request: &mut HttpRequest) -> Result<()> {
		let header = oauth1::authorization_header(
			&self.credentials,
			request.method().as_str(),
			&request.uri().to_string(),
		);
		let value = HeaderValue::from_str(header.as_str())
			.map_err(|source| ConfigError::InvalidHeader { header: OAUTH_HEADER, source })?;
		let headers = request.headers_mut();

		headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
		headers.insert(HeaderName::from_static("oauth"), value);

		Ok(())
	}
}

fn decode_json<D>(body: Vec<u8>) -> Result<D>
where
	D: DeserializeOwned,
{
	let mut deserializer = serde_json::Deserializer::from_slice(&body);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| DecodeError { source }.into())
}
