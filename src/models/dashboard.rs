//! Dashboard snapshot published to the view

use std::sync::Arc;

use super::{Balance, DisplayTransaction, PriceSeries, SessionState, User};

/// Everything the view needs to draw one frame.
///
/// Each slice is replaced independently as its fetch resolves; a failed
/// fetch leaves its slice untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSnapshot {
    /// BTC/USD spot price with two decimals
    pub price: Option<String>,
    pub balance: Balance,
    pub transactions: Arc<Vec<DisplayTransaction>>,
    pub chart: PriceSeries,
    pub user: Option<User>,
    pub session: SessionState,
}
