// self
use crate::{_prelude::*, obs::RequestOutcome};

/// Upper bound on the body bytes echoed by debug events.
const DEBUG_BODY_PREVIEW: usize = 512;

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedRequest<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedRequest<F> = F;

/// Span wrapping a single signed call.
#[derive(Clone, Debug)]
pub struct RequestSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RequestSpan {
	/// Creates a new span tagged with the request method and path.
	pub fn new(method: &Method, path: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"cardinity.request",
				method = method.as_str(),
				path,
				status = tracing::field::Empty,
				outcome = tracing::field::Empty,
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (method, path);

			Self {}
		}
	}

	/// Records the response status once it is known.
	pub fn record_status(&self, status: StatusCode) {
		#[cfg(feature = "tracing")]
		{
			self.span.record("status", status.as_u16());
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = status;
		}
	}

	/// Records how the call ended.
	pub fn record_outcome(&self, outcome: RequestOutcome) {
		#[cfg(feature = "tracing")]
		{
			self.span.record("outcome", outcome.as_str());
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = outcome;
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedRequest<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a debug event describing a received response.
///
/// Only the first bytes of the body are echoed, lossily decoded as UTF-8.
pub fn debug_response(status: StatusCode, body: &[u8]) {
	#[cfg(feature = "tracing")]
	{
		let preview = String::from_utf8_lossy(&body[..body.len().min(DEBUG_BODY_PREVIEW)]);

		tracing::debug!(
			status = status.as_u16(),
			body_len = body.len(),
			body = %preview,
			"response received"
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (status, body, DEBUG_BODY_PREVIEW);
	}
}

/// Emits a debug event for an error response whose body is not surfaced.
///
/// Only the body length is recorded.
pub fn debug_withheld_response(status: StatusCode, body_len: usize) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(status = status.as_u16(), body_len, "response body withheld");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (status, body_len);
	}
}

/// Logging sink injected into a client.
///
/// By default spans and events go to the ambient (thread-local or global) dispatcher. A client
/// built with an explicit dispatcher scopes every span and event of its calls to that
/// dispatcher instead, leaving process-wide logging state untouched.
#[derive(Clone, Debug, Default)]
pub struct LogDispatch {
	#[cfg(feature = "tracing")]
	dispatch: Option<tracing::Dispatch>,
}
impl LogDispatch {
	/// Routes spans and events to `dispatch`.
	#[cfg(feature = "tracing")]
	pub fn new(dispatch: tracing::Dispatch) -> Self {
		Self { dispatch: Some(dispatch) }
	}

	/// Whether a dispatcher was injected.
	pub fn is_injected(&self) -> bool {
		#[cfg(feature = "tracing")]
		{
			self.dispatch.is_some()
		}
		#[cfg(not(feature = "tracing"))]
		{
			false
		}
	}

	/// Drives `fut` with this sink as the current dispatcher.
	pub async fn scope<Fut>(&self, fut: Fut) -> Fut::Output
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::instrument::WithSubscriber;

			if let Some(dispatch) = &self.dispatch {
				return fut.with_subscriber(dispatch.clone()).await;
			}
		}

		fut.await
	}
}
