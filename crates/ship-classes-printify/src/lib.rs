pub mod cache;
pub mod client;
mod wire;

pub use cache::ResponseCache;
pub use client::{PrintifyClient, PrintifyConfig};
