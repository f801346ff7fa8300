// std
use std::{
	collections::HashSet,
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	sync::{
		Arc, Mutex,
		atomic::{AtomicUsize, Ordering},
	},
	time::Duration,
};
// self
use cardinity::{
	auth::Credentials,
	client::{Client, ClientConfig},
	error::{Error, TransportError},
	http::{HttpRequest, HttpResponse, HttpTransport, ResponseBody, TransportFuture},
	http_types::{Method, StatusCode},
	oauth1::{Nonce, Timestamp, authorization_header_at},
};

#[derive(Debug)]
enum FakeError {
	Refused,
	Truncated,
}
impl Display for FakeError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Refused => write!(f, "Connection refused."),
			Self::Truncated => write!(f, "Body stream truncated."),
		}
	}
}
impl StdError for FakeError {}

/// Body double that counts how many times its resource is released.
struct FakeBody {
	bytes: Vec<u8>,
	truncated: bool,
	released: Arc<AtomicUsize>,
}
impl Drop for FakeBody {
	fn drop(&mut self) {
		self.released.fetch_add(1, Ordering::SeqCst);
	}
}
impl ResponseBody for FakeBody {
	type Error = FakeError;

	fn collect(self) -> TransportFuture<'static, Vec<u8>, Self::Error> {
		Box::pin(async move {
			if self.truncated { Err(FakeError::Truncated) } else { Ok(self.bytes.clone()) }
		})
	}
}

#[derive(Clone, Debug)]
struct SentRequest {
	method: Method,
	uri: String,
	oauth: String,
	content_type: String,
}

#[derive(Default)]
struct FakeTransport {
	status: u16,
	body: Vec<u8>,
	truncated: bool,
	refuse: bool,
	hang: bool,
	released: Arc<AtomicUsize>,
	sent: Mutex<Vec<SentRequest>>,
}
impl FakeTransport {
	fn respond(status: u16, body: &str) -> Self {
		Self { status, body: body.as_bytes().to_vec(), ..Default::default() }
	}

	fn released(&self) -> usize {
		self.released.load(Ordering::SeqCst)
	}

	fn sent(&self) -> Vec<SentRequest> {
		self.sent.lock().expect("Sent request log should not be poisoned.").clone()
	}
}
impl HttpTransport for FakeTransport {
	type Body = FakeBody;
	type Error = FakeError;

	fn send(
		&self,
		request: HttpRequest,
	) -> TransportFuture<'_, HttpResponse<Self::Body>, Self::Error> {
		let header = |name: &str| {
			request
				.headers()
				.get(name)
				.and_then(|value| value.to_str().ok())
				.unwrap_or_default()
				.to_owned()
		};

		self.sent.lock().expect("Sent request log should not be poisoned.").push(SentRequest {
			method: request.method().clone(),
			uri: request.uri().to_string(),
			oauth: header("oauth"),
			content_type: header("content-type"),
		});

		Box::pin(async move {
			if self.hang {
				std::future::pending::<()>().await;
			}
			if self.refuse {
				return Err(FakeError::Refused);
			}

			let body = FakeBody {
				bytes: self.body.clone(),
				truncated: self.truncated,
				released: self.released.clone(),
			};
			let mut response = HttpResponse::new(body);

			*response.status_mut() =
				StatusCode::from_u16(self.status).expect("Fixture status should be valid.");

			Ok(response)
		})
	}
}

fn credentials() -> Credentials {
	Credentials::new("test_key", "yasd2aw/ASd&fwer").expect("Fixture credentials should be valid.")
}

fn client(transport: FakeTransport) -> (Client<FakeTransport>, Arc<FakeTransport>) {
	let transport = Arc::new(transport);
	let client = Client::with_transport(credentials(), ClientConfig::default(), transport.clone());

	(client, transport)
}

fn oauth_param<'a>(header: &'a str, name: &str) -> &'a str {
	header
		.split('&')
		.filter_map(|pair| pair.split_once('='))
		.find_map(|(key, value)| (key == name).then_some(value))
		.expect("OAuth parameter should be present.")
}

#[tokio::test]
async fn success_body_is_released_once() {
	let (client, transport) = client(FakeTransport::respond(200, r#"{"id":"abc"}"#));
	let request = client.prepare(Method::GET, "payments/abc").expect("Request should prepare.");
	let body = client.execute_raw(request).await.expect("Success body should be returned.");

	assert_eq!(body, br#"{"id":"abc"}"#);
	assert_eq!(transport.released(), 1);
}

#[tokio::test]
async fn decode_failure_releases_body_once() {
	let (client, transport) = client(FakeTransport::respond(200, "not json"));
	let request = client.prepare(Method::GET, "payments").expect("Request should prepare.");
	let err = client
		.execute_json::<serde_json::Value>(request)
		.await
		.expect_err("Non-JSON body should fail to decode.");

	assert!(matches!(err, Error::Decode(_)));
	assert_eq!(transport.released(), 1);
}

#[tokio::test]
async fn api_error_releases_body_once() {
	let (client, transport) = client(FakeTransport::respond(
		402,
		r#"{"type":"https://developers.cardinity.com/api/v1/#402","title":"Invalid Card","status":402,"detail":"Card Declined"}"#,
	));
	let request = client.prepare(Method::POST, "payments").expect("Request should prepare.");
	let err = client.execute_raw(request).await.expect_err("402 should surface as an error.");

	assert_eq!(
		err.to_string(),
		"invalid card: card declined (https://developers.cardinity.com/api/v1/#402)"
	);
	assert_eq!(transport.released(), 1);
}

#[tokio::test]
async fn unexpected_error_releases_body_once() {
	let (client, transport) = client(FakeTransport::respond(503, "Service Unavailable"));
	let request = client.prepare(Method::GET, "payments").expect("Request should prepare.");
	let err = client.execute_raw(request).await.expect_err("503 should surface as an error.");

	assert_eq!(err.to_string(), "unexpected error: 503 Service Unavailable");
	assert_eq!(transport.released(), 1);
}

#[tokio::test]
async fn foreign_json_error_body_is_unexpected() {
	let (client, transport) =
		client(FakeTransport::respond(503, r#"{"message":"Service Unavailable"}"#));
	let request = client.prepare(Method::GET, "payments").expect("Request should prepare.");
	let err = client.execute_raw(request).await.expect_err("503 should surface as an error.");

	assert!(matches!(err, Error::Unexpected { .. }));
	assert_eq!(err.to_string(), "unexpected error: 503 Service Unavailable");
	assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
	assert_eq!(transport.released(), 1);
}

#[tokio::test]
async fn api_error_without_status_reports_response_status() {
	let (client, _transport) = client(FakeTransport::respond(
		429,
		r#"{"title":"Too Many Requests","detail":"Slow down"}"#,
	));
	let request = client.prepare(Method::GET, "payments").expect("Request should prepare.");
	let err = client.execute_raw(request).await.expect_err("429 should surface as an error.");

	assert!(matches!(err, Error::Api(_)));
	assert_eq!(err.to_string(), "too many requests: slow down ()");
	assert_eq!(err.status(), Some(StatusCode::TOO_MANY_REQUESTS));
}

#[tokio::test]
async fn trailing_content_after_json_is_ignored() {
	let (client, transport) = client(FakeTransport::respond(200, r#"{"id":"abc"} trailing"#));
	let request = client.prepare(Method::GET, "payments/abc").expect("Request should prepare.");
	let value = client
		.execute_json::<serde_json::Value>(request)
		.await
		.expect("Leading JSON value should decode.");

	assert_eq!(value, serde_json::json!({ "id": "abc" }));
	assert_eq!(transport.released(), 1);
}

#[tokio::test]
async fn unreadable_error_body_is_unexpected() {
	let (client, transport) =
		client(FakeTransport { truncated: true, ..FakeTransport::respond(500, "") });
	let request = client.prepare(Method::GET, "payments").expect("Request should prepare.");
	let err = client.execute_raw(request).await.expect_err("500 should surface as an error.");

	assert!(matches!(err, Error::Unexpected { status } if status.as_u16() == 500));
	assert_eq!(transport.released(), 1);
}

#[tokio::test]
async fn unreadable_success_body_is_transport_error() {
	let (client, transport) =
		client(FakeTransport { truncated: true, ..FakeTransport::respond(200, "") });
	let request = client.prepare(Method::GET, "payments").expect("Request should prepare.");
	let err = client.execute_raw(request).await.expect_err("Truncated body should fail.");

	assert!(matches!(err, Error::Transport(TransportError::Body { .. })));
	assert_eq!(transport.released(), 1);
}

#[tokio::test]
async fn send_failure_is_transport_error() {
	let (client, transport) = client(FakeTransport { refuse: true, ..Default::default() });
	let request = client.prepare(Method::GET, "payments").expect("Request should prepare.");
	let err = client.execute_raw(request).await.expect_err("Refused connection should fail.");

	assert!(matches!(err, Error::Transport(TransportError::Network { .. })));
	assert_eq!(err.status(), None);
	assert_eq!(transport.released(), 0);
}

#[tokio::test]
async fn hung_transport_is_cut_off_by_deadline() {
	let (client, _transport) = client(FakeTransport { hang: true, ..Default::default() });
	let request = client.prepare(Method::GET, "payments").expect("Request should prepare.");
	let err = client
		.execute_raw_within(request, Duration::from_millis(20))
		.await
		.expect_err("Hung transport should exceed the deadline.");

	assert!(matches!(err, Error::Transport(TransportError::DeadlineExceeded { .. })));
}

#[tokio::test]
async fn sent_header_verifies_against_recomputed_signature() {
	let (client, transport) = client(FakeTransport::respond(200, "{}"));
	let request =
		client.prepare(Method::GET, "payments?limit=10").expect("Request should prepare.");

	client.execute_raw(request).await.expect("Success body should be returned.");

	let sent = transport.sent();
	let [sent] = sent.as_slice() else { panic!("Exactly one request should be sent.") };
	let timestamp = oauth_param(&sent.oauth, "oauth_timestamp")
		.parse()
		.expect("Timestamp should be an integer.");
	let nonce = oauth_param(&sent.oauth, "oauth_nonce");
	let expected = authorization_header_at(
		&credentials(),
		sent.method.as_str(),
		&sent.uri,
		Timestamp::from_unix(timestamp),
		Nonce::new(nonce),
	);

	assert_eq!(sent.uri, "https://api.cardinity.com/v1/payments?limit=10");
	assert_eq!(sent.content_type, "application/json");
	assert_eq!(sent.oauth, expected.as_str());
	assert_eq!(nonce.len(), 32);
	assert!(sent.oauth.starts_with("oauth_consumer_key=test_key&oauth_nonce="));
	assert!(sent.oauth.rsplit('&').next().is_some_and(|last| last.starts_with("oauth_signature=")));
}

#[tokio::test]
async fn concurrent_calls_use_distinct_nonces() {
	let (client, transport) = client(FakeTransport::respond(200, "{}"));
	let calls = (0..8).map(|_| {
		let client = client.clone();

		tokio::spawn(async move {
			let request = client.prepare(Method::GET, "payments").expect("Request should prepare.");

			client.execute_raw(request).await.expect("Success body should be returned.")
		})
	});

	for call in calls.collect::<Vec<_>>() {
		call.await.expect("Spawned call should not panic.");
	}

	let nonces = transport
		.sent()
		.iter()
		.map(|sent| oauth_param(&sent.oauth, "oauth_nonce").to_owned())
		.collect::<HashSet<_>>();

	assert_eq!(nonces.len(), 8);
	assert_eq!(transport.released(), 8);
}
