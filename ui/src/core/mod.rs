pub mod cache;
pub mod catalog;
pub mod config;
pub mod format;
pub mod logging;
pub mod snapshot;
pub mod table;
pub mod timing;
