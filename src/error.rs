//! Client-level error types shared by signing, request preparation, and execution.

// self
use crate::{_prelude::*, api::ApiError};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
///
/// Every executed call produces either its success value or exactly one of these variants, so
/// callers can match exhaustively instead of probing error types.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem; the request was never sent.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, body stream, deadline).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Structured error body returned by the API for a `>= 400` status.
	#[error(transparent)]
	Api(#[from] ApiError),
	/// `>= 400` status whose body is not a recognizable API error.
	///
	/// Only the status line is kept; the body is never exposed.
	#[error("unexpected error: {status}")]
	Unexpected {
		/// HTTP status returned by the server.
		status: StatusCode,
	},
	/// Successful response whose body could not be decoded into the requested type.
	#[error(transparent)]
	Decode(#[from] DecodeError),
}
impl Error {
	/// Returns the HTTP status attached to server-side failures, if any.
	pub fn status(&self) -> Option<StatusCode> {
		match self {
			Self::Api(err) => StatusCode::from_u16(err.status).ok(),
			Self::Unexpected { status } => Some(*status),
			_ => None,
		}
	}
}

/// Configuration and validation failures raised before a request leaves the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Consumer credentials are malformed.
	#[error("Consumer credentials are invalid.")]
	InvalidCredentials(#[from] crate::auth::CredentialsError),
	/// Client configuration failed validation.
	#[error("Client configuration is invalid.")]
	InvalidConfig(#[from] crate::client::ClientConfigError),
	/// Resource path cannot be joined onto the base URL.
	#[error("Path `{path}` cannot be resolved against the base URL.")]
	InvalidPath {
		/// Path supplied by the caller.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Prepared request could not be assembled.
	#[error(transparent)]
	HttpRequest(#[from] ::http::Error),
	/// Computed header value contains bytes HTTP cannot carry.
	#[error("The {header} header value is not representable.")]
	InvalidHeader {
		/// Header name.
		header: &'static str,
		/// Underlying validation failure.
		#[source]
		source: ::http::header::InvalidHeaderValue,
	},
	/// Request body could not be serialized to JSON.
	#[error("Request body could not be serialized to JSON.")]
	RequestBody(#[source] serde_json::Error),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, body stream, deadline).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while making the request.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Response body stream failed before it was fully read.
	#[error("Response body could not be read.")]
	Body {
		/// Transport-specific stream error.
		#[source]
		source: BoxError,
	},
	/// The call did not finish before its deadline.
	#[error("Request did not complete within {deadline:?}.")]
	DeadlineExceeded {
		/// Deadline that elapsed.
		deadline: StdDuration,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Wraps a transport-specific body stream error.
	pub fn body(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Body { source: Box::new(src) }
	}
}

/// Successful response body that does not match the requested shape.
#[derive(Debug, ThisError)]
#[error("Response body could not be decoded as JSON at `{path}`.", path = .source.path())]
pub struct DecodeError {
	/// Structured parsing failure, including the JSON path that failed.
	#[source]
	pub source: serde_path_to_error::Error<serde_json::Error>,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn unexpected_error_renders_status_line_only() {
		let err = Error::Unexpected { status: StatusCode::INTERNAL_SERVER_ERROR };

		assert_eq!(err.to_string(), "unexpected error: 500 Internal Server Error");
		assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
	}

	#[test]
	fn decode_error_reports_failing_path() {
		#[derive(Debug, Deserialize)]
		struct Payment {
			#[allow(dead_code)]
			amount: f64,
		}

		let mut de = serde_json::Deserializer::from_str("{\"amount\":\"ten\"}");
		let source = serde_path_to_error::deserialize::<_, Payment>(&mut de)
			.expect_err("String amount should fail to decode.");
		let err = Error::from(DecodeError { source });

		assert_eq!(err.to_string(), "Response body could not be decoded as JSON at `amount`.");
		assert_eq!(err.status(), None);
	}
}
