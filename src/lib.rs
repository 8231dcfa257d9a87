pub mod aggregator;
pub mod config;
pub mod fetch;
pub mod model;
pub mod output;
pub mod source;
pub mod validate;
