pub mod coinbase;
pub mod error;
pub mod lnbits;
pub mod node;

pub use coinbase::CoinbaseClient;
pub use error::FetchError;
pub use lnbits::LnbitsClient;
pub use node::NodeClient;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::models::{RawTransaction, User};

/// Source of the BTC/USD spot price
#[async_trait]
pub trait PriceFeed: Send + Sync + 'static {
    async fn spot_price(&self) -> Result<f64, FetchError>;
}

/// Wallet balance and payment history provider
#[async_trait]
pub trait WalletBackend: Send + Sync + 'static {
    /// Wallet (or on-chain) balance in sats
    async fn wallet_balance(&self) -> Result<f64, FetchError>;

    /// Payment records in whatever order the backend returns them
    async fn transactions(&self) -> Result<Vec<RawTransaction>, FetchError>;

    /// Whether `channel_balance` is backed by a real endpoint
    fn has_channel_balance(&self) -> bool {
        false
    }

    /// Lightning channel balance in sats
    async fn channel_balance(&self) -> Result<f64, FetchError> {
        Err(FetchError::Unsupported("channel balance"))
    }

    /// Whether `current_user` is backed by a real endpoint
    fn has_sessions(&self) -> bool {
        false
    }

    /// Profile of the user owning `token`
    async fn current_user(&self, _token: &str) -> Result<User, FetchError> {
        Err(FetchError::Unsupported("user sessions"))
    }
}

/// GET `url` and decode the JSON body.
///
/// Non-2xx responses become `FetchError::Status` carrying the body text.
pub(crate) async fn get_json<T: DeserializeOwned>(
    http_client: &reqwest::Client,
    url: &str,
    headers: HeaderMap,
) -> Result<T, FetchError> {
    debug!("GET {}", url);

    let response = http_client
        .get(url)
        .headers(headers)
        .send()
        .await
        .map_err(|e| FetchError::Transport(e.to_string()))?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(FetchError::Status { status, body });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| FetchError::Decode(e.to_string()))
}

/// Join a base URL and a path without doubling or dropping the slash
pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
pub(crate) mod test_server {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve exactly one HTTP response and hand back the raw request text.
    pub async fn serve_once(status: u16, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let body = body.to_string();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;

            String::from_utf8_lossy(&request).to_lowercase()
        });

        (format!("http://{}", addr), handle)
    }
}
