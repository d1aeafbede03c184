pub mod serde_util;
pub mod table;

pub use table::Table;
