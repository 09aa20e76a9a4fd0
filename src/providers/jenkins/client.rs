mod builds;
mod jobs;

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONNECTION};
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::auth::Credentials;
use crate::error::{Result, StabilityError};

const ACCEPT_HEADER: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7";
const ACCEPT_LANGUAGE_HEADER: &str = "zh-CN,zh;q=0.9";
const CONNECTION_HEADER: &str = "keep-alive";

pub struct JenkinsClient {
    client: Client,
    base_url: Url,
    credentials: Credentials,
}

impl JenkinsClient {
    pub fn new(base_url: Url, credentials: Credentials, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HEADER));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_HEADER));
        headers.insert(CONNECTION, HeaderValue::from_static(CONNECTION_HEADER));

        let client = Client::builder()
            .user_agent(concat!("ci-stability/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| StabilityError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    /// Authenticated GET of a JSON document.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let request = self.credentials.authorize(self.client.get(url.clone()));
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StabilityError::Api {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| StabilityError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
