//! Transaction models

use serde::{Deserialize, Serialize};

use crate::utils::serde_util;

/// A boolean-ish flag as it appears on the wire.
///
/// Backends send `settled`/`send` either as JSON booleans or as `0`/`1`.
/// The literal kind is kept because display logic checks `false` and `0`
/// separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireFlag {
    Bool(bool),
    Number(i64),
}

impl WireFlag {
    /// Exactly the JSON literal `false`
    pub fn is_false_literal(&self) -> bool {
        matches!(self, WireFlag::Bool(false))
    }

    /// Exactly the JSON number `0`
    pub fn is_zero_literal(&self) -> bool {
        matches!(self, WireFlag::Number(0))
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            WireFlag::Bool(b) => *b,
            WireFlag::Number(n) => *n != 0,
        }
    }
}

/// A payment record as returned by the wallet backend
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawTransaction {
    #[serde(default)]
    pub id: String,
    /// Seconds since the Unix epoch
    #[serde(deserialize_with = "serde_util::i64_lenient::deserialize")]
    pub created_at: i64,
    #[serde(default)]
    pub settled: Option<WireFlag>,
    #[serde(default)]
    pub send: Option<WireFlag>,
    #[serde(deserialize_with = "serde_util::f64_lenient::deserialize")]
    pub value: f64,
    #[serde(default)]
    pub payment_request: String,
}

/// A transaction ready for display, newest first in the list
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayTransaction {
    pub id: String,
    pub created_at: i64,
    pub description: String,
    pub signed_value: String,
    pub display_date: String,
    pub unsettled_marker: bool,
}
