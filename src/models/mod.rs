//! Data models shared by the API clients, services and the view

pub mod balance;
pub mod chart;
pub mod dashboard;
pub mod session;
pub mod transaction;

pub use balance::Balance;
pub use chart::{PricePoint, PriceSeries};
pub use dashboard::DashboardSnapshot;
pub use session::{SessionState, User};
pub use transaction::{DisplayTransaction, RawTransaction, WireFlag};
