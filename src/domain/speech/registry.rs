use super::provider::ProviderKind;
use crate::infrastructure::repositories::TtsRepository;
use std::sync::Arc;

/// Ordered set of speech providers, built once at startup and shared read-only.
pub struct TtsProviderRegistry {
    providers: Vec<Arc<dyn TtsRepository>>,
}

impl TtsProviderRegistry {
    /// Providers are kept in fixed priority order regardless of argument order
    pub fn new(mut providers: Vec<Arc<dyn TtsRepository>>) -> Self {
        providers.sort_by_key(|provider| provider.kind());
        Self { providers }
    }

    pub fn get(&self, kind: ProviderKind) -> Option<&Arc<dyn TtsRepository>> {
        self.providers.iter().find(|provider| provider.kind() == kind)
    }

    /// Providers with a credential, highest priority first
    pub fn configured(&self) -> impl Iterator<Item = &Arc<dyn TtsRepository>> + '_ {
        self.providers.iter().filter(|provider| provider.is_configured())
    }

    pub fn configured_kinds(&self) -> Vec<ProviderKind> {
        self.configured().map(|provider| provider.kind()).collect()
    }

    /// Provider an unprefixed voice selector resolves to
    pub fn default_provider(&self) -> Option<&Arc<dyn TtsRepository>> {
        self.configured().next()
    }

    /// Attempt order for a request: the resolved provider first, then every other
    /// configured provider in priority order.
    ///
    /// An explicitly requested provider is included even when unconfigured so its
    /// `ProviderUnavailable` failure is observed and logged.
    pub fn attempt_order(&self, explicit: Option<ProviderKind>) -> Vec<Arc<dyn TtsRepository>> {
        let first = match explicit {
            Some(kind) => self.get(kind),
            None => self.default_provider(),
        };

        let mut order: Vec<Arc<dyn TtsRepository>> = first.into_iter().cloned().collect();
        for provider in self.configured() {
            if order.iter().all(|chosen| chosen.kind() != provider.kind()) {
                order.push(provider.clone());
            }
        }
        order
    }
}
