//! baht-core: shared types for turning bank statement text into transactions

pub mod bank;
pub mod chunks;
pub mod error;
pub mod transaction;

pub use bank::{Bank, StatementType};
pub use chunks::RawChunkGroups;
pub use error::{Result, StatementError};
pub use transaction::Transaction;
