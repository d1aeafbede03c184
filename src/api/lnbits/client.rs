use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client as HttpClient;

use super::models::WalletResponse;
use crate::api::{get_json, join_url, FetchError, WalletBackend};
use crate::models::RawTransaction;

/// LNbits wallet API client authenticated with an `X-Api-Key`
pub struct LnbitsClient {
    http_client: HttpClient,
    api_key: Option<String>,
    base_url: String,
}

impl LnbitsClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://legend.lnbits.com/api/v1";

    /// Create a new LNbits client
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            base_url,
        }
    }

    /// Headers carrying the API key, empty when no key is configured
    fn create_headers(&self) -> Result<HeaderMap, FetchError> {
        let mut headers = HeaderMap::new();

        if let Some(key) = &self.api_key {
            let value = HeaderValue::from_str(key)
                .map_err(|e| FetchError::Header(format!("Failed to create X-Api-Key header: {}", e)))?;
            headers.insert("X-Api-Key", value);
        }

        Ok(headers)
    }

    /// GET /wallet
    ///
    /// The balance in the returned record is denominated in millisats.
    pub async fn get_wallet(&self) -> Result<WalletResponse, FetchError> {
        let url = join_url(&self.base_url, "wallet");
        get_json(&self.http_client, &url, self.create_headers()?).await
    }

    /// GET /payments
    pub async fn get_payments(&self) -> Result<Vec<RawTransaction>, FetchError> {
        let url = join_url(&self.base_url, "payments");
        get_json(&self.http_client, &url, self.create_headers()?).await
    }
}

#[async_trait]
impl WalletBackend for LnbitsClient {
    async fn wallet_balance(&self) -> Result<f64, FetchError> {
        Ok(self.get_wallet().await?.balance_sats())
    }

    async fn transactions(&self) -> Result<Vec<RawTransaction>, FetchError> {
        self.get_payments().await
    }
}
