//! HTTP Fetch Helper
//!
//! Thin wrapper around `reqwest` that sorts failures into transport, status
//! and parse errors. `fetch_json` is the forgiving entry point: it logs and
//! returns `None` instead of failing.

use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

const USER_AGENT: &str = concat!("wanted-board/", env!("CARGO_PKG_VERSION"));

/// Why a request produced no data
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("network error for {url}: {message}")]
    Network { url: String, message: String },
    #[error("HTTP {status} from {url}")]
    Http { url: String, status: u16 },
    #[error("malformed JSON from {url}: {message}")]
    Parse { url: String, message: String },
}

impl FetchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::Http { status, .. } if *status == StatusCode::NOT_FOUND.as_u16())
    }
}

/// Build the shared client
pub fn build_client(timeout: Duration) -> Result<Client, FetchError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| FetchError::Network {
            url: String::new(),
            message: e.to_string(),
        })
}

/// GET a JSON document, logging and swallowing any failure
pub async fn fetch_json<T: DeserializeOwned>(client: &Client, url: &str) -> Option<T> {
    match try_fetch_json(client, url).await {
        Ok(value) => Some(value),
        Err(e) => {
            log::error!("{}", e);
            None
        }
    }
}

/// GET a JSON document
pub async fn try_fetch_json<T: DeserializeOwned>(client: &Client, url: &str) -> Result<T, FetchError> {
    let body = send(client, Method::GET, url, None::<&()>).await?;
    parse(url, &body)
}

/// Send a JSON body and decode the JSON reply
pub async fn send_json<B, T>(client: &Client, method: Method, url: &str, body: &B) -> Result<T, FetchError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let reply = send(client, method, url, Some(body)).await?;
    parse(url, &reply)
}

/// Send a request whose reply body is irrelevant
pub async fn send_empty(client: &Client, method: Method, url: &str) -> Result<(), FetchError> {
    send(client, method, url, None::<&()>).await.map(|_| ())
}

async fn send<B>(client: &Client, method: Method, url: &str, body: Option<&B>) -> Result<String, FetchError>
where
    B: Serialize + ?Sized,
{
    let network = |e: reqwest::Error| FetchError::Network {
        url: url.to_string(),
        message: e.to_string(),
    };

    let mut request = client.request(method, url);
    if let Some(body) = body {
        request = request.json(body);
    }

    let response = request.send().await.map_err(network)?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Http {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(network)
}

fn parse<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Parse {
        url: url.to_string(),
        message: e.to_string(),
    })
}
