pub mod chart_service;
pub mod poll_service;
pub mod session_service;
pub mod transaction_service;
pub mod view_service;
