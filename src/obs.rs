//! Optional observability helpers for signed API calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` (on by default) to run every call inside a span named `cardinity.request`
//!   with `method`, `path`, and `status` fields, and to route a client's spans/events to an
//!   injected [`LogDispatch`] instead of the process-wide default.
//! - Enable `metrics` to increment the `cardinity_request_total` counter once per call, labeled by
//!   `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each executed call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestOutcome {
	/// Success payload returned (raw or decoded).
	Success,
	/// Structured API error returned.
	ApiError,
	/// Error status with an unrecognizable body.
	UnexpectedError,
	/// Success status whose body failed to decode.
	DecodeError,
	/// Network, body stream, or deadline failure.
	TransportError,
	/// Request rejected locally before it was sent.
	ConfigError,
}
impl RequestOutcome {
	/// Classifies the result of an executed call.
	pub fn of<T>(result: &Result<T>) -> Self {
		match result {
			Ok(_) => Self::Success,
			Err(Error::Api(_)) => Self::ApiError,
			Err(Error::Unexpected { .. }) => Self::UnexpectedError,
			Err(Error::Decode(_)) => Self::DecodeError,
			Err(Error::Transport(_)) => Self::TransportError,
			Err(Error::Config(_)) => Self::ConfigError,
		}
	}

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequestOutcome::Success => "success",
			RequestOutcome::ApiError => "api_error",
			RequestOutcome::UnexpectedError => "unexpected_error",
			RequestOutcome::DecodeError => "decode_error",
			RequestOutcome::TransportError => "transport_error",
			RequestOutcome::ConfigError => "config_error",
		}
	}
}
impl Display for RequestOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn outcome_follows_error_variant() {
		assert_eq!(RequestOutcome::of(&Ok::<_, Error>(())), RequestOutcome::Success);
		assert_eq!(
			RequestOutcome::of::<()>(&Err(Error::Unexpected { status: StatusCode::BAD_GATEWAY })),
			RequestOutcome::UnexpectedError
		);
		assert_eq!(RequestOutcome::DecodeError.to_string(), "decode_error");
	}
}
