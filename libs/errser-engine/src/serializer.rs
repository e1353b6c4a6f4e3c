use std::sync::Arc;

use errser_api::{ErrorValue, PlainValue, SerializeError, SerializerPlugin};
use serializer_base::BaseSerializer;

use crate::chain::Chain;
use crate::config::SerializerOptions;
use crate::error::EngineError;
use crate::registry;

/// The conversion function handed to callers.
///
/// Immutable once built and shareable across threads; each call to
/// [`serialize`](Self::serialize) keeps its own cycle-guard state.
#[derive(Debug, Clone)]
pub struct ErrorSerializer {
    chain: Chain,
}

impl ErrorSerializer {
    /// Build from options with the standard base serializer as catch-all.
    pub fn new(options: &SerializerOptions) -> Result<Self, EngineError> {
        Self::with_base(options, Arc::new(BaseSerializer))
    }

    /// Build from options with a custom catch-all.
    ///
    /// `base` must report itself as catch-all.
    pub fn with_base(
        options: &SerializerOptions,
        base: Arc<dyn SerializerPlugin>,
    ) -> Result<Self, EngineError> {
        let mut plugins = registry::select(options)?;
        plugins.push(base);
        Self::from_plugins(plugins)
    }

    /// Build from an explicit, ordered plugin list ending in a catch-all.
    pub fn from_plugins(plugins: Vec<Arc<dyn SerializerPlugin>>) -> Result<Self, EngineError> {
        let chain = Chain::new(plugins)?;
        tracing::info!(serializers = ?chain.names(), "created error serializer");
        Ok(Self { chain })
    }

    /// Base serializer only. Cannot fail.
    pub fn base() -> Self {
        Self {
            chain: Chain::base_only(),
        }
    }

    pub fn plugin_names(&self) -> Vec<&'static str> {
        self.chain.names()
    }

    /// Convert `value` into plain data.
    ///
    /// Absent results (undefined, null, functions) come back as `Null`.
    pub fn serialize(&self, value: &ErrorValue) -> Result<PlainValue, SerializeError> {
        self.chain.serialize(value)
    }
}
