use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::utils::error::{Error, Result};

/// Per-request timeout shared by the API and proxy clients
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Thin JSON client bound to a base URL
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base: Url,
}

impl HttpClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, base: parse_base_url(base_url)? })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.base.join(path)?;
        log::debug!("GET {}", url);
        let resp = self.client.get(url).send().await?;
        decode(resp, "GET", path).await
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.base.join(path)?;
        log::debug!("POST {}", url);
        let resp = self.client.post(url).json(body).send().await?;
        decode(resp, "POST", path).await
    }
}

async fn decode<T: DeserializeOwned>(resp: Response, method: &str, path: &str) -> Result<T> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(Error::ApiError(format!("{} {} returned {}: {}", method, path, status, body)));
    }
    Ok(resp.json::<T>().await?)
}

/// Relative paths are joined onto the base, so it must end with a slash.
fn parse_base_url(base_url: &str) -> Result<Url> {
    let trimmed = base_url.trim();
    if trimmed.ends_with('/') {
        Ok(Url::parse(trimmed)?)
    } else {
        Ok(Url::parse(&format!("{}/", trimmed))?)
    }
}
