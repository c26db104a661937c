pub mod core;
mod error;
pub mod structs;
pub mod tasks;
mod utils;

pub use error::ProviderError;
