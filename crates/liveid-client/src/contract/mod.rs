mod bindings;
mod client;
mod config;

pub use bindings::LivenessRegistry;
pub use client::RegistryClient;
pub use config::{RegistryConfig, ZERO_ADDRESS};

#[cfg(test)]
mod tests;
