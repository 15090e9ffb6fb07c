pub mod config;
pub mod error;
pub mod geo;
pub mod llm;
pub mod places;

pub use config::Config;
pub use error::{Error, Result};
