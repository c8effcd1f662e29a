pub mod config;
pub mod defs;
pub mod error;
