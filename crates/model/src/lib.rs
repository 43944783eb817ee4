pub mod bucket;
pub mod errors;
pub mod filter;
pub mod month;
pub mod page;
pub mod report;
pub mod transaction;
