pub mod env;
mod loader;

pub use env::{AppConfig, DirectoryConfig, EndpointConfig};
pub use loader::load_config;
