//! Balance models

/// Wallet balances in sats
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Balance {
    /// On-chain balance, or the whole wallet balance for LNbits
    pub onchain: f64,
    /// Funds held in Lightning channels, only known to the node backend
    pub channel: Option<f64>,
}
