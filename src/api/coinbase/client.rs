use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Client as HttpClient;

use super::models::SpotPriceResponse;
use crate::api::{get_json, join_url, FetchError, PriceFeed};

/// Coinbase public price API client, no credentials needed
pub struct CoinbaseClient {
    http_client: HttpClient,
    base_url: String,
    pair: String,
}

impl CoinbaseClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.coinbase.com/v2";
    const DEFAULT_PAIR: &'static str = "BTC-USD";

    /// Create a client against the given API root
    pub fn new(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url,
            pair: Self::DEFAULT_PAIR.to_string(),
        }
    }

    /// GET /prices/BTC-USD/spot
    ///
    /// Returns the spot amount parsed into a float.
    pub async fn get_spot_price(&self) -> Result<f64, FetchError> {
        let url = join_url(&self.base_url, &format!("prices/{}/spot", self.pair));
        let response: SpotPriceResponse = get_json(&self.http_client, &url, HeaderMap::new()).await?;

        response
            .data
            .amount
            .trim()
            .parse::<f64>()
            .map_err(|e| FetchError::Decode(format!("Invalid amount '{}': {}", response.data.amount, e)))
    }
}

#[async_trait]
impl PriceFeed for CoinbaseClient {
    async fn spot_price(&self) -> Result<f64, FetchError> {
        self.get_spot_price().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server::serve_once;

    #[tokio::test]
    async fn test_spot_price_parses_amount() {
        let (base, server) = serve_once(
            200,
            r#"{"data":{"base":"BTC","currency":"USD","amount":"27012.345"}}"#,
        )
        .await;

        let price = CoinbaseClient::new(base).spot_price().await.unwrap();
        let request = server.await.unwrap();

        assert_eq!(price, 27012.345);
        assert!(request.starts_with("get /prices/btc-usd/spot "));
        assert!(!request.contains("x-api-key"));
    }

    #[tokio::test]
    async fn test_spot_price_rejects_non_numeric_amount() {
        let (base, server) = serve_once(200, r#"{"data":{"amount":"n/a"}}"#).await;

        let result = CoinbaseClient::new(base).spot_price().await;
        server.await.unwrap();

        assert!(matches!(result, Err(FetchError::Decode(_))));
    }
}
