pub mod check;
pub mod disease;
pub mod dispatch;
pub mod entry;
pub mod recommend;
pub mod search;
pub mod shared;
pub mod stats;
