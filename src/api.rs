//! Structured error bodies returned by the Cardinity API.
//!
//! Any response with a status of 400 or above is expected to carry an [`ApiError`]. Decoding is
//! lenient: missing fields fall back to empty values and a `null` field list is treated as empty.
//! A body only counts as an API error when it names at least one of `type`, `title`, or `detail`;
//! any other JSON object (a gateway's `{"message": ...}`, say) is not one.

// std
use std::fmt::Write;
// self
use crate::_prelude::*;

/// Error response body (`application/problem+json` shaped).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
	/// URI identifying the error category.
	#[serde(default, rename = "type")]
	pub kind: String,
	/// Short human-readable summary.
	#[serde(default)]
	pub title: String,
	/// HTTP status echoed by the server.
	#[serde(default)]
	pub status: u16,
	/// Human-readable explanation specific to this occurrence.
	#[serde(default)]
	pub detail: String,
	/// Field-level validation failures.
	#[serde(default, deserialize_with = "null_as_empty")]
	pub errors: Vec<FieldError>,
}
impl ApiError {
	/// Decodes an error body, returning `None` when it does not have the expected shape.
	pub fn from_slice(body: &[u8]) -> Option<Self> {
		serde_json::from_slice(body).ok()
	}

	/// Decodes the error body of a response carrying `status`.
	///
	/// Returns `None` unless the body has the API error shape. A missing or out-of-range `status`
	/// field is replaced by the response status.
	pub fn from_response(status: StatusCode, body: &[u8]) -> Option<Self> {
		let mut api_error = Self::from_slice(body)?;

		if api_error.kind.is_empty() && api_error.title.is_empty() && api_error.detail.is_empty() {
			return None;
		}
		if StatusCode::from_u16(api_error.status).is_err() {
			api_error.status = status.as_u16();
		}

		Some(api_error)
	}
}
impl Display for ApiError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let mut rendered = format!("{}: {} ({})", self.title, self.detail, self.kind);

		for e in &self.errors {
			let rejected = e.rejected.as_deref().unwrap_or_default();

			write!(rendered, "\n{}: {} {rejected}", e.field, e.message)?;
		}

		f.write_str(&rendered.to_lowercase())
	}
}
impl StdError for ApiError {}

/// Rejected field reported inside an [`ApiError`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
	/// Name of the offending request field.
	#[serde(default)]
	pub field: String,
	/// Value the server rejected, when echoed back.
	#[serde(default)]
	pub rejected: Option<String>,
	/// Explanation for the rejection.
	#[serde(default)]
	pub message: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<FieldError>, D::Error>
where
	D: serde::Deserializer<'de>,
{
	Ok(Option::<Vec<FieldError>>::deserialize(deserializer)?.unwrap_or_default())
}
