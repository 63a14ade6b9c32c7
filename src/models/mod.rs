pub mod chat;
pub mod envelope;
pub mod error;
pub mod generation;

pub use chat::{ChatRequest, ChatTurn, ResponseBody};
pub use envelope::ResponseEnvelope;
pub use error::{RelayError, UpstreamError};
pub use generation::{GenerationRequest, GenerationResponse};
