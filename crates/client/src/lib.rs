pub mod config;
pub mod http;
pub mod render;

pub use config::{ClientConfig, ConfigError};
pub use http::HttpStore;
