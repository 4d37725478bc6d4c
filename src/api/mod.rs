mod client;
mod config;
mod error;
mod http_client;
mod token;

#[cfg(test)]
pub(crate) mod stub;

pub use client::EmChat;
pub use config::{ClientConfig, DEFAULT_API_URL};
pub use error::{EmChatError, Result};
pub use http_client::{ApiRequest, ApiResponse, HttpTransport, Transport};
pub use token::TokenGrant;
