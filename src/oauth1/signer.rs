//! Signature base string construction and HMAC-SHA1 signing.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use sha1::Sha1;
// self
use crate::{
	_prelude::*,
	auth::{ConsumerSecret, Credentials},
	oauth1::{Nonce, OAUTH_VERSION, SIGNATURE_METHOD, Timestamp, encode_pairs, percent_encode},
};

type HmacSha1 = Hmac<Sha1>;

/// The OAuth protocol parameters that take part in the signature.
///
/// Backed by a [`BTreeMap`], so iteration and [`encode`](OAuthParams::encode) are always in
/// ascending key order. `oauth_signature` is never part of this set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OAuthParams(BTreeMap<&'static str, String>);
impl OAuthParams {
	/// Assembles the five base parameters for a consumer-only request.
	pub fn new(consumer_key: &str, timestamp: Timestamp, nonce: &Nonce) -> Self {
		let mut map = BTreeMap::new();

		map.insert("oauth_consumer_key", consumer_key.to_owned());
		map.insert("oauth_nonce", nonce.as_str().to_owned());
		map.insert("oauth_signature_method", SIGNATURE_METHOD.to_owned());
		map.insert("oauth_timestamp", timestamp.to_string());
		map.insert("oauth_version", OAUTH_VERSION.to_owned());

		Self(map)
	}

	/// Looks up a parameter value by name.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.0.get(name).map(String::as_str)
	}

	/// Iterates over `(name, value)` pairs in ascending name order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(key, value)| (*key, value.as_str()))
	}

	/// Encodes the set as a query string (sorted, both sides percent-encoded).
	pub fn encode(&self) -> String {
		encode_pairs(self.iter())
	}
}

/// Builds the canonical string that gets signed.
///
/// `UPPER(method) & pe(uri) & pe(params.encode())`
pub fn signature_base_string(method: &str, uri: &str, params: &OAuthParams) -> String {
	format!(
		"{}&{}&{}",
		method.to_ascii_uppercase(),
		percent_encode(uri),
		percent_encode(&params.encode())
	)
}

/// Computes the base64 HMAC-SHA1 signature of `base_string`.
///
/// The key is `pe(consumer_secret) & pe(token_secret)` where the token secret is always empty.
pub fn sign(consumer_secret: &ConsumerSecret, base_string: &str) -> String {
	let key = format!("{}&{}", percent_encode(consumer_secret.expose()), percent_encode(""));
	let mut mac =
		HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC accepts keys of any length.");

	mac.update(base_string.as_bytes());

	STANDARD.encode(mac.finalize().into_bytes())
}

/// Signed authorization string sent as the `OAuth` header value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationHeader {
	params: OAuthParams,
	timestamp: Timestamp,
	nonce: Nonce,
	signature: String,
	value: String,
}
impl AuthorizationHeader {
	/// Rendered header value.
	pub fn as_str(&self) -> &str {
		&self.value
	}

	/// Base64 signature carried in `oauth_signature`.
	pub fn signature(&self) -> &str {
		&self.signature
	}

	/// Parameters the signature was computed over.
	pub fn params(&self) -> &OAuthParams {
		&self.params
	}

	/// Timestamp used for this header.
	pub fn timestamp(&self) -> Timestamp {
		self.timestamp
	}

	/// Nonce used for this header.
	pub fn nonce(&self) -> &Nonce {
		&self.nonce
	}

	/// Consumes the header, returning the rendered value.
	pub fn into_string(self) -> String {
		self.value
	}
}
impl Display for AuthorizationHeader {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.value)
	}
}

/// Signs a request with a fresh timestamp and nonce.
pub fn authorization_header(
	credentials: &Credentials,
	method: &str,
	uri: &str,
) -> AuthorizationHeader {
	authorization_header_at(credentials, method, uri, Timestamp::now(), Nonce::random())
}

/// Signs a request with an explicit timestamp and nonce.
///
/// Identical inputs always produce an identical header.
pub fn authorization_header_at(
	credentials: &Credentials,
	method: &str,
	uri: &str,
	timestamp: Timestamp,
	nonce: Nonce,
) -> AuthorizationHeader {
	let params = OAuthParams::new(credentials.consumer_key(), timestamp, &nonce);
	let base_string = signature_base_string(method, uri, &params);
	let signature = sign(credentials.consumer_secret(), &base_string);
	let value =
		format!("{}&{}", params.encode(), encode_pairs([("oauth_signature", signature.as_str())]));

	AuthorizationHeader { params, timestamp, nonce, signature, value }
}
