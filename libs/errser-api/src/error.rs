use crate::value::ErrorValue;

/// Failure raised by an accessor or a callable property.
///
/// Carries a human-readable message only; serializers never inspect it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct AccessError {
    message: String,
}

impl AccessError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { message: msg.into() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Error returned by serializer plugins and the resolution chain.
///
/// None of these are recoverable mid-walk: the whole top-level call fails.
#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    /// No plugin in the chain accepted the value; the chain lacks a catch-all.
    #[error("no serializer accepts a value of kind '{kind}'")]
    Unresolvable { kind: &'static str },

    /// Reading a property (accessor or callable) failed.
    #[error("reading property '{key}': {source}")]
    Access {
        key: String,
        #[source]
        source: AccessError,
    },

    /// A plugin was handed a value its capability test rejects.
    #[error("serializer '{plugin}' cannot handle a value of kind '{kind}'")]
    Unsupported {
        plugin: &'static str,
        kind: &'static str,
    },
}

impl SerializeError {
    pub fn access(key: impl Into<String>, source: AccessError) -> Self {
        Self::Access {
            key: key.into(),
            source,
        }
    }

    pub fn unsupported(plugin: &'static str, value: &ErrorValue) -> Self {
        Self::Unsupported {
            plugin,
            kind: value.kind(),
        }
    }
}
