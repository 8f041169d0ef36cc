pub mod mock;
pub mod openai;

pub use mock::MockTransport;
pub use openai::{OpenAiTransport, OPENAI_API_BASE};
