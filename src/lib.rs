pub mod config;
pub mod pump;
pub mod ring;
