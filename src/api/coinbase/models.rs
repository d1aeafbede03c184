use serde::Deserialize;

/// Response from GET /prices/{pair}/spot
#[derive(Debug, Clone, Deserialize)]
pub struct SpotPriceResponse {
    pub data: SpotPrice,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotPrice {
    /// Decimal string, e.g. "27012.345"
    pub amount: String,
}
