//! Bounded-concurrency HTTP fan-out
//!
//! This module handles:
//! - Building the shared HTTP client
//! - Describing outbound requests (`RequestDescriptor`)
//! - Running a batch of requests with at most N in flight
//! - Correlating every response to the request at the same batch position
//! - Classifying transport failures without aborting the batch

use crate::config::Settings;
use crate::GistError;
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, Request, RequestBuilder, StatusCode};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinError;

/// Default number of requests in flight at once
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Media type requested from the REST API
const API_MEDIA_TYPE: &str = "application/vnd.github+json";

/// Builds the HTTP client shared by every request of a run
///
/// # Arguments
///
/// * `settings` - The run settings (timeout)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(settings: &Settings) -> Result<Client, reqwest::Error> {
    let user_agent = format!("gistwatcher/{}", env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(settings.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// One outbound request together with the client that sends it
#[derive(Debug)]
pub struct RequestDescriptor {
    client: Client,
    request: Request,
}

impl RequestDescriptor {
    /// Builds a GET request, optionally authorized for the REST API
    ///
    /// Fails when the URL or header value cannot form a valid request.
    pub fn get(client: &Client, url: &str, authorization: Option<&str>) -> Result<Self, GistError> {
        let mut builder = client.get(url);
        if let Some(authorization) = authorization {
            builder = builder
                .header(AUTHORIZATION, authorization)
                .header(ACCEPT, API_MEDIA_TYPE);
        }

        Self::from_builder(client, url, builder)
    }

    /// Builds a request with an arbitrary method and header set
    pub fn new(
        client: &Client,
        method: Method,
        url: &str,
        headers: HeaderMap,
    ) -> Result<Self, GistError> {
        Self::from_builder(client, url, client.request(method, url).headers(headers))
    }

    fn from_builder(client: &Client, url: &str, builder: RequestBuilder) -> Result<Self, GistError> {
        let request = builder.build().map_err(|source| GistError::Http {
            url: url.to_string(),
            source,
        })?;

        Ok(Self {
            client: client.clone(),
            request,
        })
    }

    pub fn url(&self) -> &str {
        self.request.url().as_str()
    }

    pub fn method(&self) -> &Method {
        self.request.method()
    }

    /// Sends the request and reads the whole body
    async fn send(self) -> ResponseEnvelope {
        let url = self.url().to_string();

        let outcome = match self.client.execute(self.request).await {
            Ok(response) => {
                let status = response.status();
                let headers = response.headers().clone();
                match response.bytes().await {
                    Ok(body) => Ok(HttpResponse {
                        status,
                        headers,
                        body: body.to_vec(),
                    }),
                    Err(e) => Err(TransportError::classify(&e)),
                }
            }
            Err(e) => Err(TransportError::classify(&e)),
        };

        if let Err(e) = &outcome {
            tracing::warn!("Request to {} failed: {}", url, e);
        }

        ResponseEnvelope { url, outcome }
    }
}

/// Transport-level failure of a single request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Request timeout")]
    Timeout,

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("{0}")]
    Other(String),

    #[error("Request task failed: {0}")]
    Task(String),
}

impl TransportError {
    fn classify(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            TransportError::Timeout
        } else if error.is_connect() {
            TransportError::Connect(error.to_string())
        } else {
            TransportError::Other(error.to_string())
        }
    }
}

/// A fully read HTTP response
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns a header value if present and valid UTF-8
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Body decoded as UTF-8, with invalid sequences replaced
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Response (or transport failure) for the request at the same batch index
#[derive(Debug)]
pub struct ResponseEnvelope {
    pub url: String,
    pub outcome: Result<HttpResponse, TransportError>,
}

impl ResponseEnvelope {
    pub fn is_success(&self) -> bool {
        matches!(&self.outcome, Ok(response) if response.is_success())
    }
}

/// Runs `task` over every input with at most `max_concurrency` in flight
///
/// Each input gets its own spawned task and its own result slot, so
/// `output[i]` is always the result for `inputs[i]` regardless of the order
/// in which tasks finish. A panicking task surfaces as a `JoinError` in its
/// own slot only.
pub async fn execute_batch<T, R, F, Fut>(
    inputs: Vec<T>,
    max_concurrency: usize,
    task: F,
) -> Vec<Result<R, JoinError>>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = R> + Send + 'static,
    R: Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(max_concurrency.max(1)));

    let handles: Vec<_> = inputs
        .into_iter()
        .map(|input| {
            let semaphore = Arc::clone(&semaphore);
            let work = task(input);
            tokio::spawn(async move {
                // The semaphore is never closed, so acquisition cannot fail
                let _permit = semaphore.acquire_owned().await.ok();
                work.await
            })
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await);
    }
    results
}

/// Executes request batches with bounded parallelism
#[derive(Debug, Clone, Copy)]
pub struct ConcurrentFetcher {
    max_concurrency: usize,
}

impl Default for ConcurrentFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_CONCURRENCY)
    }
}

impl ConcurrentFetcher {
    pub fn new(max_concurrency: usize) -> Self {
        Self {
            max_concurrency: max_concurrency.max(1),
        }
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Sends every descriptor and returns one envelope per descriptor, in
    /// submission order
    ///
    /// A request that fails at the transport layer yields an envelope
    /// carrying the error; it never prevents collection of the others.
    pub async fn execute(&self, descriptors: Vec<RequestDescriptor>) -> Vec<ResponseEnvelope> {
        let urls: Vec<String> = descriptors.iter().map(|d| d.url().to_string()).collect();

        tracing::debug!(
            "Dispatching {} requests ({} in flight max)",
            descriptors.len(),
            self.max_concurrency
        );

        execute_batch(descriptors, self.max_concurrency, RequestDescriptor::send)
            .await
            .into_iter()
            .zip(urls)
            .map(|(joined, url)| {
                joined.unwrap_or_else(|e| ResponseEnvelope {
                    url,
                    outcome: Err(TransportError::Task(e.to_string())),
                })
            })
            .collect()
    }
}
