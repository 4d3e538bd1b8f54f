pub mod catalog;
pub mod chunker;
pub mod error;
pub mod normalizer;
pub mod provider;
pub mod registry;
pub mod service;
pub mod voice;

#[cfg(test)]
pub(crate) mod test_support;

pub use catalog::{VoiceEntry, VoicesResponse};
pub use error::{SpeechServiceError, TtsProviderError};
pub use provider::ProviderKind;
pub use registry::TtsProviderRegistry;
pub use service::{AudioResult, SpeechService, SpeechServiceApi, SynthesisRequest};
pub use voice::VoiceSelector;
