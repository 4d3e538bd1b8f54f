use super::provider::ProviderKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceEntry {
    pub id: String,
    pub name: String,
}

impl VoiceEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Response for GET /api/voices
#[derive(Debug, Serialize, Deserialize)]
pub struct VoicesResponse {
    pub voices: Vec<VoiceEntry>,
}

/// Rewrite native voice ids into selectors the synthesis endpoint can parse back
pub fn tag_voices(provider: ProviderKind, voices: Vec<VoiceEntry>) -> Vec<VoiceEntry> {
    voices
        .into_iter()
        .map(|voice| VoiceEntry {
            id: provider.selector_for(&voice.id),
            name: if provider == ProviderKind::ElevenLabs {
                voice.name
            } else {
                format!("{} ({})", voice.name, provider.display_name())
            },
        })
        .collect()
}

/// Voices offered when no provider could be enumerated, so the catalog is never empty
pub fn static_fallback_voices() -> Vec<VoiceEntry> {
    vec![
        VoiceEntry::new("21m00Tcm4TlvDq8ikWAM", "Rachel (calm)"),
        VoiceEntry::new("EXAVITQu4vr4xnSDxMaL", "Bella (soft)"),
        VoiceEntry::new("ErXwobaYiN019PkySvjV", "Antoni (warm)"),
        VoiceEntry::new("pNInz6obpgDQGcFmaJgB", "Adam (deep)"),
    ]
}
