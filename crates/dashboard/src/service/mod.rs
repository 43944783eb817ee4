pub mod calendar;
pub mod charts;
pub mod loader;
pub mod statistics;
pub mod transactions;
