//! HTTP client utilities for testing.
//!
//! This module provides helper functions for making HTTP requests to the
//! georegion server during tests.

use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::net::SocketAddr;
use std::time::Duration;

/// Default timeout for HTTP requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Create a default test client
pub fn create_test_client() -> Client {
    Client::builder()
        .timeout(DEFAULT_TIMEOUT)
        .build()
        .expect("Failed to build test HTTP client")
}

/// Build a URL for a georegion server endpoint
pub fn build_url(addr: &SocketAddr, path: &str) -> Url {
    format!("http://{}{}", addr, path)
        .parse()
        .expect("Failed to parse URL")
}

/// Make a GET request to the georegion server
pub async fn get(addr: &SocketAddr, path: &str) -> Result<Response, Box<dyn Error>> {
    let client = create_test_client();
    Ok(client.get(build_url(addr, path)).send().await?)
}

/// Make a GET request with query parameters, letting reqwest encode them
pub async fn get_with_query(
    addr: &SocketAddr,
    path: &str,
    query: &[(&str, &str)],
) -> Result<Response, Box<dyn Error>> {
    let client = create_test_client();
    Ok(client.get(build_url(addr, path)).query(query).send().await?)
}

/// Make a POST request with a JSON body
pub async fn post_json<B: Serialize>(
    addr: &SocketAddr,
    path: &str,
    body: &B,
) -> Result<Response, Box<dyn Error>> {
    let client = create_test_client();
    Ok(client.post(build_url(addr, path)).json(body).send().await?)
}

/// Parse a JSON response, failing on any status other than 200
pub async fn expect_json<T: DeserializeOwned>(response: Response) -> Result<T, Box<dyn Error>> {
    if response.status() != StatusCode::OK {
        return Err(format!(
            "Unexpected status code: {}, body: {:?}",
            response.status(),
            response.text().await
        )
        .into());
    }

    Ok(response.json::<T>().await?)
}

/// Make a GET request and parse the JSON response
pub async fn get_json<T: DeserializeOwned>(
    addr: &SocketAddr,
    path: &str,
) -> Result<T, Box<dyn Error>> {
    expect_json(get(addr, path).await?).await
}
