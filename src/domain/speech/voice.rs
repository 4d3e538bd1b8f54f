use super::provider::ProviderKind;

/// Parsed form of the client-supplied `voice_id` query parameter.
///
/// `openai_<voice>` and `groq_<voice>` address those providers explicitly. Anything
/// else is a native voice id of the default provider, see [`VoiceSelector::resolve_default`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceSelector {
    /// Provider named by a recognised prefix, if any
    pub explicit_provider: Option<ProviderKind>,
    /// Provider the voice id belongs to
    pub native_provider: ProviderKind,
    /// Voice id with the prefix removed
    pub voice_id: String,
}

impl VoiceSelector {
    pub fn parse(selector: &str) -> Self {
        let selector = selector.trim();

        for kind in [ProviderKind::OpenAi, ProviderKind::Groq] {
            if let Some(voice_id) = selector.strip_prefix(kind.selector_prefix()) {
                if !voice_id.is_empty() {
                    return Self {
                        explicit_provider: Some(kind),
                        native_provider: kind,
                        voice_id: voice_id.to_string(),
                    };
                }
            }
        }

        Self {
            explicit_provider: None,
            native_provider: ProviderKind::ElevenLabs,
            voice_id: selector.to_string(),
        }
    }

    /// Bind an unprefixed voice id to the provider an unprefixed selector resolves to.
    /// Explicit selectors are left as parsed.
    pub fn resolve_default(mut self, default_provider: Option<ProviderKind>) -> Self {
        if self.explicit_provider.is_none() {
            if let Some(kind) = default_provider {
                self.native_provider = kind;
            }
        }
        self
    }

    /// Voice id to request from `target`, translated by character when the target is
    /// not the provider the voice belongs to
    pub fn voice_for(&self, target: ProviderKind) -> String {
        if target == self.native_provider {
            return self.voice_id.clone();
        }

        character_of(self.native_provider, &self.voice_id)
            .and_then(|character| voice_with_character(target, character))
            .unwrap_or_else(|| target.default_voice())
            .to_string()
    }
}

/// Broad tone of a voice, used to pick an equivalent voice on a fallback provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceCharacter {
    CalmFemale,
    SoftFemale,
    WarmMale,
    DeepMale,
    Neutral,
}

/// Known voices per provider. The first entry per (provider, character) is the one a
/// fallback translates to.
const VOICE_TABLE: &[(ProviderKind, &str, VoiceCharacter)] = &[
    (ProviderKind::ElevenLabs, "21m00Tcm4TlvDq8ikWAM", VoiceCharacter::CalmFemale), // Rachel
    (ProviderKind::ElevenLabs, "EXAVITQu4vr4xnSDxMaL", VoiceCharacter::SoftFemale), // Bella
    (ProviderKind::ElevenLabs, "MF3mGyEYCl7XYWbV9V6O", VoiceCharacter::SoftFemale), // Elli
    (ProviderKind::ElevenLabs, "ErXwobaYiN019PkySvjV", VoiceCharacter::WarmMale),   // Antoni
    (ProviderKind::ElevenLabs, "pNInz6obpgDQGcFmaJgB", VoiceCharacter::DeepMale),   // Adam
    (ProviderKind::ElevenLabs, "TxGEqnHWrfWFTfGW9XjX", VoiceCharacter::DeepMale),   // Josh
    (ProviderKind::ElevenLabs, "AZnzlk1XvdvUeBnXmlld", VoiceCharacter::Neutral),    // Domi
    (ProviderKind::OpenAi, "shimmer", VoiceCharacter::CalmFemale),
    (ProviderKind::OpenAi, "nova", VoiceCharacter::SoftFemale),
    (ProviderKind::OpenAi, "echo", VoiceCharacter::WarmMale),
    (ProviderKind::OpenAi, "fable", VoiceCharacter::WarmMale),
    (ProviderKind::OpenAi, "onyx", VoiceCharacter::DeepMale),
    (ProviderKind::OpenAi, "alloy", VoiceCharacter::Neutral),
    (ProviderKind::Groq, "Celeste-PlayAI", VoiceCharacter::CalmFemale),
    (ProviderKind::Groq, "Arista-PlayAI", VoiceCharacter::SoftFemale),
    (ProviderKind::Groq, "Deedee-PlayAI", VoiceCharacter::SoftFemale),
    (ProviderKind::Groq, "Basil-PlayAI", VoiceCharacter::WarmMale),
    (ProviderKind::Groq, "Calum-PlayAI", VoiceCharacter::WarmMale),
    (ProviderKind::Groq, "Atlas-PlayAI", VoiceCharacter::DeepMale),
    (ProviderKind::Groq, "Thunder-PlayAI", VoiceCharacter::DeepMale),
    (ProviderKind::Groq, "Quinn-PlayAI", VoiceCharacter::Neutral),
];

pub fn character_of(provider: ProviderKind, voice_id: &str) -> Option<VoiceCharacter> {
    VOICE_TABLE
        .iter()
        .find(|(kind, id, _)| *kind == provider && id.eq_ignore_ascii_case(voice_id))
        .map(|(_, _, character)| *character)
}

pub fn voice_with_character(
    provider: ProviderKind,
    character: VoiceCharacter,
) -> Option<&'static str> {
    VOICE_TABLE
        .iter()
        .find(|(kind, _, c)| *kind == provider && *c == character)
        .map(|(_, id, _)| *id)
}
