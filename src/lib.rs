pub mod cluster;
pub mod config;
pub mod sizing;
pub mod validate;

mod utils;
