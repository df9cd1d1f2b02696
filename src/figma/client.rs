use anyhow::{Context, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::error::ExtractError;
use crate::figma::nodes::{FigmaFileResponse, FigmaNodesResponse};

pub const FIGMA_API_BASE: &str = "https://api.figma.com/v1";

/// Read-only access to the two endpoints the extractors need. Calls are made
/// one at a time; each pipeline issues at most one request per endpoint.
#[derive(Debug, Clone)]
pub struct FigmaClient {
    http: Client,
    token: String,
    api_base: String,
}

impl FigmaClient {
    pub fn new(http: Client, token: String) -> Self {
        Self {
            http,
            token,
            api_base: FIGMA_API_BASE.to_owned(),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_owned();
        self
    }

    /// `GET /files/{key}`: the document tree with its page list.
    pub async fn fetch_file(&self, file_key: &str) -> Result<FigmaFileResponse> {
        info!(file_key, "fetching document structure");
        let response = self
            .http
            .get(format!("{}/files/{file_key}", self.api_base))
            .header("X-Figma-Token", &self.token)
            .send()
            .await
            .context("failed to call Figma files API")?;
        let file: FigmaFileResponse = decode(response, "Figma files API").await?;
        debug!(document = %file.name, "document structure received");
        Ok(file)
    }

    /// `GET /files/{key}/nodes?ids={id}`: the full subtree of one page.
    pub async fn fetch_page(&self, file_key: &str, page_id: &str) -> Result<FigmaNodesResponse> {
        info!(file_key, page_id, "fetching page content");
        let response = self
            .http
            .get(format!("{}/files/{file_key}/nodes", self.api_base))
            .header("X-Figma-Token", &self.token)
            .query(&[("ids", page_id)])
            .send()
            .await
            .context("failed to call Figma nodes API")?;
        decode(response, "Figma nodes API").await
    }
}

async fn decode<T: DeserializeOwned>(response: Response, endpoint: &str) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(ExtractError::network(
            endpoint,
            status.as_u16(),
            status.canonical_reason().unwrap_or("unknown status"),
        )
        .into());
    }
    response
        .json()
        .await
        .with_context(|| format!("failed to decode {endpoint} response"))
}

#[cfg(test)]
mod tests {
    use reqwest::Client;

    use super::{FigmaClient, FIGMA_API_BASE};

    #[test]
    fn api_base_defaults_to_figma_and_trims_override() {
        let client = FigmaClient::new(Client::new(), "token".to_owned());
        assert_eq!(client.api_base, FIGMA_API_BASE);

        let client = client.with_api_base("http://127.0.0.1:9000/v1/");
        assert_eq!(client.api_base, "http://127.0.0.1:9000/v1");
    }
}
