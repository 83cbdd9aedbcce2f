pub mod config;
pub mod document;
pub mod error;
pub mod json;

pub use config::Config;
pub use document::*;
pub use error::*;
