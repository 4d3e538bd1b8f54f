use serde::{Deserialize, Serialize};

/// Text-to-speech vendors, declared in fixed priority order.
///
/// The order reflects configuration precedence, not voice quality: an unprefixed voice
/// selector resolves to the first configured kind in this list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    ElevenLabs,
    OpenAi,
    Groq,
}

impl ProviderKind {
    pub const PRIORITY: [ProviderKind; 3] =
        [ProviderKind::ElevenLabs, ProviderKind::OpenAi, ProviderKind::Groq];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::ElevenLabs => "elevenlabs",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Groq => "groq",
        }
    }

    /// Human readable vendor name used in voice labels
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderKind::ElevenLabs => "ElevenLabs",
            ProviderKind::OpenAi => "OpenAI",
            ProviderKind::Groq => "Groq",
        }
    }

    /// Voice-selector prefix. ElevenLabs ids travel unprefixed.
    pub fn selector_prefix(&self) -> &'static str {
        match self {
            ProviderKind::ElevenLabs => "",
            ProviderKind::OpenAi => "openai_",
            ProviderKind::Groq => "groq_",
        }
    }

    /// Voice used when a requested voice has no equivalent on this provider
    pub fn default_voice(&self) -> &'static str {
        match self {
            ProviderKind::ElevenLabs => "21m00Tcm4TlvDq8ikWAM",
            ProviderKind::OpenAi => "alloy",
            ProviderKind::Groq => "Fritz-PlayAI",
        }
    }

    /// Tag a native voice id with this provider's selector prefix
    pub fn selector_for(&self, native_voice_id: &str) -> String {
        format!("{}{}", self.selector_prefix(), native_voice_id)
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
