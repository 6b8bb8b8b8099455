use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use url::Url;

use coherence_core::{Error, Result};

use crate::gateway::QueryGateway;
use crate::results::{ResultSet, SPARQL_RESULTS_JSON};

const MAX_ERROR_BODY_CHARS: usize = 512;

/// Options for the HTTP gateway.
#[derive(Debug, Clone)]
pub struct HttpGatewayOptions {
    /// Per-request timeout enforced by the HTTP client.
    pub timeout: Duration,
    /// Optional bearer token sent with every request.
    pub token: Option<String>,
}

impl Default for HttpGatewayOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            token: None,
        }
    }
}

/// Gateway that talks to a SPARQL 1.1 protocol endpoint over HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    endpoint: Url,
    client: reqwest::Client,
    options: HttpGatewayOptions,
}

impl HttpGateway {
    pub fn new(endpoint: &str, options: HttpGatewayOptions) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|err| Error::InvalidEndpoint(format!("{endpoint}: {err}")))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(Error::InvalidEndpoint(format!(
                "unsupported scheme `{}`",
                endpoint.scheme()
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(options.timeout)
            .user_agent(concat!("coherence/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| Error::Gateway(format!("failed to create client: {err}")))?;

        Ok(Self {
            endpoint,
            client,
            options,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn request_url(&self, query: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("query", query);
        url
    }
}

#[async_trait]
impl QueryGateway for HttpGateway {
    fn engine(&self) -> &'static str {
        "http"
    }

    async fn execute(&self, query: &str) -> Result<ResultSet> {
        tracing::trace!(event = "query_sent", query = %query);

        let mut request = self
            .client
            .get(self.request_url(query))
            .header(ACCEPT, SPARQL_RESULTS_JSON);
        if let Some(token) = &self.options.token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request.send().await.map_err(|err| {
            if err.is_timeout() {
                Error::Timeout(self.options.timeout)
            } else {
                Error::Gateway(err.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
            return Err(Error::Gateway(format!("HTTP {status}: {body}")));
        }

        let body = response.bytes().await.map_err(|err| {
            if err.is_timeout() {
                Error::Timeout(self.options.timeout)
            } else {
                Error::Gateway(err.to_string())
            }
        })?;

        ResultSet::from_json(&body)
    }
}
