//! Signs a payment lookup with OAuth 1.0 against a local mock of the Cardinity API, then shows how
//! a declined payment surfaces as a structured API error.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde::Deserialize;
use url::Url;
// self
use cardinity::{
	auth::Credentials,
	client::{Client, ClientConfig},
	error::Error,
	http_types::Method,
};

#[derive(Debug, Deserialize)]
struct Payment {
	id: String,
	amount: String,
	currency: String,
	status: String,
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let lookup_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v1/payments/cb5e1c95").header_exists("oauth");
			then.status(200).header("content-type", "application/json").body(
				"{\"id\":\"cb5e1c95\",\"amount\":\"50.00\",\"currency\":\"EUR\",\"status\":\"approved\"}",
			);
		})
		.await;
	let declined_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v1/payments");
			then.status(402).header("content-type", "application/problem+json").body(
				"{\"type\":\"https://developers.cardinity.com/api/v1/#402\",\"title\":\"Invalid Card\",\
				 \"status\":402,\"detail\":\"Card Declined\"}",
			);
		})
		.await;
	let credentials = Credentials::new("demo-consumer-key", "demo-consumer-secret")?;
	let config = ClientConfig::builder()
		.base_url(Url::parse(&server.url("/v1/"))?)
		.allow_insecure_http(true)
		.build()?;
	let client = Client::with_config(credentials, config)?;
	let request = client.prepare(Method::GET, "payments/cb5e1c95")?;
	let payment = client.execute_json::<Payment>(request).await?;

	println!(
		"Payment {} is {} ({} {}).",
		payment.id, payment.status, payment.amount, payment.currency
	);

	let request = client.prepare_json(
		Method::POST,
		"payments",
		&serde_json::json!({ "amount": "50.00", "currency": "EUR" }),
	)?;

	match client.execute_json::<Payment>(request).await {
		Err(Error::Api(api_error)) => {
			println!("Declined with HTTP {}: {api_error}", api_error.status)
		},
		other => println!("Unexpected result: {other:?}"),
	}

	lookup_mock.assert_async().await;
	declined_mock.assert_async().await;

	Ok(())
}
