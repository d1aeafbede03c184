use serde::Deserialize;

use crate::utils::serde_util;

/// Response from GET /wallet
#[derive(Debug, Clone, Deserialize)]
pub struct WalletResponse {
    /// Denominated in millisats
    #[serde(deserialize_with = "serde_util::f64_lenient::deserialize")]
    pub balance: f64,
}

impl WalletResponse {
    pub fn balance_sats(&self) -> f64 {
        self.balance / 1000.0
    }
}
