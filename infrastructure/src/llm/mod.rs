//! Chat-model adapters.

mod openai;

pub use openai::OpenAiChatGateway;
