pub mod sync_result;
pub mod user_balance;

pub use sync_result::SyncResult;
pub use user_balance::{BALANCE_COLUMN, RowRecord, TELEGRAM_ID_COLUMN, UserBalance};
