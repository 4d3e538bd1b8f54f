pub mod elevenlabs_tts_repository;
pub mod generation_repository;
pub mod groq_generation_repository;
pub mod groq_tts_repository;
pub mod meditation_repository;
pub mod openai_tts_repository;
pub mod provider_http;
pub mod tts_repository;

pub use elevenlabs_tts_repository::ElevenLabsTtsRepository;
pub use generation_repository::{GeneratedMeditation, MeditationGenerator};
pub use groq_generation_repository::GroqMeditationGenerator;
pub use groq_tts_repository::GroqTtsRepository;
pub use meditation_repository::{MeditationRepository, PgMeditationRepository};
pub use openai_tts_repository::OpenAiTtsRepository;
pub use tts_repository::TtsRepository;
