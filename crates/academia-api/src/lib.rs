// academia-api: Async client for the academia REST backend

pub mod client;
pub mod error;
pub mod types;

pub use client::Client;
pub use error::Error;
