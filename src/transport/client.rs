use async_trait::async_trait;
use futures_util::StreamExt;
use hyper::ext::ReasonPhrase;
use reqwest::{
    Client, Url,
    header::{HeaderMap, HeaderName, HeaderValue},
    redirect,
};
use std::time::Duration;
use tracing::error;

use crate::config::TransportConfig;
use crate::error::{AppError, AppResult, TransportError};

use super::{Transport, TransportRequest, TransportResponse};

pub const DEFAULT_USER_AGENT: &str = concat!("volley/", env!("CARGO_PKG_VERSION"));

const DEFAULT_REDIRECT_LIMIT: u32 = 10;

/// `Transport` backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Builds the underlying client from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built (TLS backend
    /// initialization failure, for instance).
    pub fn new(config: &TransportConfig) -> AppResult<Self> {
        let mut client_builder = Client::builder();

        if !config.no_user_agent {
            let user_agent = config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
            client_builder = client_builder.user_agent(user_agent);
        }

        let redirect_limit = config.redirect_limit.unwrap_or(DEFAULT_REDIRECT_LIMIT);
        if redirect_limit == 0 {
            client_builder = client_builder.redirect(redirect::Policy::none());
        } else {
            client_builder = client_builder.redirect(redirect::Policy::limited(
                usize::try_from(redirect_limit).unwrap_or(10),
            ));
        }

        if config.disable_keepalive {
            client_builder = client_builder
                .pool_max_idle_per_host(0)
                .pool_idle_timeout(Some(Duration::from_secs(0)));
        }

        if config.disable_compression {
            client_builder = client_builder.no_gzip().no_brotli().no_deflate();
        }

        let client = match client_builder.build() {
            Ok(c) => c,
            Err(e) => {
                error!("Failed to build HTTP client: {}", e);
                return Err(AppError::transport(TransportError::BuildClient {
                    source: e,
                }));
            }
        };

        Ok(Self { client })
    }

    /// Wraps an already configured client.
    #[must_use]
    pub const fn from_client(client: Client) -> Self {
        Self { client }
    }
}

fn build_headers(request: &TransportRequest) -> Result<HeaderMap, TransportError> {
    let mut headers = HeaderMap::with_capacity(request.headers.len());
    for (key, value) in &request.headers {
        let name = HeaderName::from_bytes(key.as_bytes()).map_err(|err| {
            TransportError::InvalidHeaderName {
                name: key.clone(),
                source: err,
            }
        })?;
        let val = HeaderValue::from_str(value).map_err(|err| {
            TransportError::InvalidHeaderValue {
                name: key.clone(),
                source: err,
            }
        })?;
        headers.insert(name, val);
    }
    Ok(headers)
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let url = Url::parse(&request.url).map_err(|err| TransportError::InvalidUrl {
            url: request.url.clone(),
            source: err,
        })?;
        let headers = build_headers(&request)?;
        let method = request.method;

        let response = self
            .client
            .request(method.into(), url)
            .headers(headers)
            .body(request.body)
            .send()
            .await
            .map_err(|err| TransportError::Send {
                method: method.as_str(),
                url: request.url,
                source: err,
            })?;

        let status = response.status();
        let response_headers = response.headers().clone();
        let reason = response
            .extensions()
            .get::<ReasonPhrase>()
            .and_then(|phrase| std::str::from_utf8(phrase.as_bytes()).ok())
            .map(str::to_owned);
        let body = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|err| TransportError::ReadBody { source: err }))
            .boxed();

        Ok(TransportResponse {
            status,
            headers: response_headers,
            reason,
            body,
        })
    }
}
