mod client_utils;
mod errors;
mod generator;
pub mod openai;

pub use errors::*;
pub use generator::*;
