pub mod cli;
pub mod config;
pub mod display;
pub mod map;
pub mod utils;
pub mod weather;
