use serde::Deserialize;

use crate::models::RawTransaction;
use crate::utils::serde_util;

/// Response from GET /lightning/balance (LND `walletbalance`)
#[derive(Debug, Clone, Deserialize)]
pub struct WalletBalanceResponse {
    #[serde(deserialize_with = "serde_util::f64_lenient::deserialize")]
    pub total_balance: f64,
}

/// Response from GET /lightning/channelbalance (LND `channelbalance`)
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelBalanceResponse {
    #[serde(deserialize_with = "serde_util::f64_lenient::deserialize")]
    pub balance: f64,
}

/// Response from GET /lightning/invoices
///
/// The backend either wraps the list in `{"invoices": [...]}` or returns
/// the bare array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum InvoicesResponse {
    Wrapped { invoices: Vec<RawTransaction> },
    Bare(Vec<RawTransaction>),
}

impl InvoicesResponse {
    pub fn into_transactions(self) -> Vec<RawTransaction> {
        match self {
            InvoicesResponse::Wrapped { invoices } => invoices,
            InvoicesResponse::Bare(invoices) => invoices,
        }
    }
}
