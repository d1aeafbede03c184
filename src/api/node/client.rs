use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client as HttpClient;

use super::models::{ChannelBalanceResponse, InvoicesResponse, WalletBalanceResponse};
use crate::api::{get_json, join_url, FetchError, WalletBackend};
use crate::models::{RawTransaction, User};

/// Client for a backend that proxies an LND node.
///
/// Node data is served without credentials; only the user profile needs a
/// bearer token.
pub struct NodeClient {
    http_client: HttpClient,
    base_url: String,
}

impl NodeClient {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:5500";

    pub fn new(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url,
        }
    }

    fn bearer_headers(token: &str) -> Result<HeaderMap, FetchError> {
        let mut headers = HeaderMap::new();
        let auth_value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| FetchError::Header(format!("Failed to create auth header: {}", e)))?;
        headers.insert(AUTHORIZATION, auth_value);
        Ok(headers)
    }

    /// GET /lightning/balance
    pub async fn get_wallet_balance(&self) -> Result<WalletBalanceResponse, FetchError> {
        let url = join_url(&self.base_url, "lightning/balance");
        get_json(&self.http_client, &url, HeaderMap::new()).await
    }

    /// GET /lightning/channelbalance
    pub async fn get_channel_balance(&self) -> Result<ChannelBalanceResponse, FetchError> {
        let url = join_url(&self.base_url, "lightning/channelbalance");
        get_json(&self.http_client, &url, HeaderMap::new()).await
    }

    /// GET /lightning/invoices
    pub async fn get_invoices(&self) -> Result<InvoicesResponse, FetchError> {
        let url = join_url(&self.base_url, "lightning/invoices");
        get_json(&self.http_client, &url, HeaderMap::new()).await
    }

    /// GET /users/user
    ///
    /// # Arguments
    /// * `token` - Bearer token read from the token file at startup
    pub async fn get_user(&self, token: &str) -> Result<User, FetchError> {
        let url = join_url(&self.base_url, "users/user");
        get_json(&self.http_client, &url, Self::bearer_headers(token)?).await
    }
}

#[async_trait]
impl WalletBackend for NodeClient {
    async fn wallet_balance(&self) -> Result<f64, FetchError> {
        Ok(self.get_wallet_balance().await?.total_balance)
    }

    async fn transactions(&self) -> Result<Vec<RawTransaction>, FetchError> {
        Ok(self.get_invoices().await?.into_transactions())
    }

    fn has_channel_balance(&self) -> bool {
        true
    }

    async fn channel_balance(&self) -> Result<f64, FetchError> {
        Ok(self.get_channel_balance().await?.balance)
    }

    fn has_sessions(&self) -> bool {
        true
    }

    async fn current_user(&self, token: &str) -> Result<User, FetchError> {
        self.get_user(token).await
    }
}
