pub mod config;
pub mod mode;
