//! Strict RFC 3986 percent-encoding used by every part of the signature.

// crates.io
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Everything except the unreserved set (`ALPHA / DIGIT / "-" / "." / "_" / "~"`).
const OAUTH_ENCODE_SET: &AsciiSet =
	&NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Percent-encodes `value` the way OAuth 1.0 requires.
///
/// Unlike form encoding, a space becomes `%20` and `*` is escaped; hex digits are uppercase.
pub fn percent_encode(value: &str) -> String {
	utf8_percent_encode(value, OAUTH_ENCODE_SET).to_string()
}

/// Renders `pairs` as `k=v` joined by `&`, encoding both sides of every pair.
///
/// Pairs are emitted in iteration order; callers own the ordering.
pub fn encode_pairs<'a, I>(pairs: I) -> String
where
	I: IntoIterator<Item = (&'a str, &'a str)>,
{
	let mut buf = String::new();

	for (idx, (key, value)) in pairs.into_iter().enumerate() {
		if idx > 0 {
			buf.push('&');
		}

		buf.push_str(&percent_encode(key));
		buf.push('=');
		buf.push_str(&percent_encode(value));
	}

	buf
}
