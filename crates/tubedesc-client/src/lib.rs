pub mod client;

pub use client::GenerationClient;
