pub mod config;

pub use config::{UnknownFieldPolicy, ValidationConfig};
