use std::sync::Arc;

use crate::{
    config::Config,
    error::ConfigError,
    providers::{ProviderKind, ProviderRef},
    subscribers::Subscribe,
};

use super::pipeline::Pipeline;

/// How the builder obtains its provider.
enum ProviderChoice {
    Kind(ProviderKind),
    Custom(ProviderRef),
}

/// Builder for constructing a [`Pipeline`].
///
/// Everything that can be wrong with the setup is reported by [`build`](Self::build),
/// before any input is read.
pub struct PipelineBuilder {
    cfg: Config,
    provider: Option<ProviderChoice>,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl PipelineBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            provider: None,
            subscribers: Vec::new(),
        }
    }

    /// Selects one of the built-in providers; it is constructed from the config in `build`.
    pub fn with_provider_kind(mut self, kind: ProviderKind) -> Self {
        self.provider = Some(ProviderChoice::Kind(kind));
        self
    }

    /// Uses a caller-supplied provider (test fixtures, custom sources).
    pub fn with_provider(mut self, provider: ProviderRef) -> Self {
        self.provider = Some(ProviderChoice::Custom(provider));
        self
    }

    /// Sets event subscribers for observability and reporting.
    ///
    /// Subscribers receive pipeline events through dedicated workers with bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Validates the configuration and resolves the provider.
    ///
    /// ### Errors
    /// - [`ConfigError::MissingProvider`] if no provider was selected
    /// - [`ConfigError::EmptyTarget`] / [`ConfigError::ZeroLimit`] from [`Config::validate`]
    /// - [`ConfigError::HttpClient`] if the `url` provider cannot be constructed
    pub fn build(self) -> Result<Pipeline, ConfigError> {
        self.cfg.validate()?;

        let provider = match self.provider {
            Some(ProviderChoice::Kind(kind)) => kind.build(&self.cfg)?,
            Some(ProviderChoice::Custom(provider)) => provider,
            None => return Err(ConfigError::MissingProvider),
        };
        Ok(Pipeline::new_internal(self.cfg, provider, self.subscribers))
    }
}
