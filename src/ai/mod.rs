mod client;
mod decode;
pub mod dto;

pub use client::{AiError, AiGateway, ChatGateway};
