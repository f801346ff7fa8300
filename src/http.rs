//! Transport primitives for signed API calls.
//!
//! The module exposes [`HttpTransport`] and [`ResponseBody`] so downstream crates can plug in a
//! custom HTTP stack (or a test double) without touching the signing or classification logic.
//! A transport only moves bytes: it sends a fully prepared [`HttpRequest`] and hands back the
//! status, headers, and an unread body. The client decides what to do with the body and consumes
//! it through [`ResponseBody::collect`], which takes the body by value so it is released exactly
//! once whichever branch the client takes.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// self
use crate::_prelude::*;

/// Outbound request shape accepted by every transport.
pub type HttpRequest = ::http::Request<Vec<u8>>;
/// Response shape returned by a transport, carrying a not-yet-read body.
pub type HttpResponse<B> = ::http::Response<B>;
/// Boxed future returned by transport operations.
pub type TransportFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of sending signed requests.
///
/// The trait acts as the client's only dependency on an HTTP stack. Implementations must be
/// `Send + Sync + 'static` so a single transport can be shared across clients and in-flight
/// calls, and the futures they return must be `Send` so callers can spawn them freely.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type Error: 'static + Send + Sync + StdError;
	/// Unread response body handed back with each response.
	type Body: ResponseBody;

	/// Sends `request` and resolves once the status line and headers are available.
	///
	/// Connection, DNS, and TLS failures surface as [`Self::Error`]; HTTP error statuses are
	/// ordinary responses.
	fn send(
		&self,
		request: HttpRequest,
	) -> TransportFuture<'_, HttpResponse<Self::Body>, Self::Error>;
}

/// Response body that can be read to completion exactly once.
pub trait ResponseBody
where
	Self: 'static + Send,
{
	/// Concrete error emitted while streaming the body.
	type Error: 'static + Send + Sync + StdError;

	/// Reads the whole body, consuming (and thereby releasing) the underlying resource.
	fn collect(self) -> TransportFuture<'static, Vec<u8>, Self::Error>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestHttpClient {
	type Body = ReqwestBody;
	type Error = ReqwestError;

	fn send(
		&self,
		request: HttpRequest,
	) -> TransportFuture<'_, HttpResponse<Self::Body>, Self::Error> {
		let client = self.0.clone();

		Box::pin(async move {
			let response = client.execute(request.try_into()?).await?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new = HttpResponse::new(ReqwestBody(response));

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok::<_, ReqwestError>(response_new)
		})
	}
}

/// Unread reqwest response body.
#[cfg(feature = "reqwest")]
#[derive(Debug)]
pub struct ReqwestBody(reqwest::Response);
#[cfg(feature = "reqwest")]
impl ResponseBody for ReqwestBody {
	type Error = ReqwestError;

	fn collect(self) -> TransportFuture<'static, Vec<u8>, Self::Error> {
		Box::pin(async move { Ok::<_, ReqwestError>(self.0.bytes().await?.to_vec()) })
	}
}
