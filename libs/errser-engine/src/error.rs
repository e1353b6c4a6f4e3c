#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("config error: {0}")]
    Config(String),

    #[error(
        "cannot both include and exclude serializers: including keeps only what is listed, \
         excluding starts from every serializer and removes some"
    )]
    Conflict,

    #[error("serializer chain is empty")]
    EmptyChain,

    #[error("serializer chain must end with a catch-all serializer, found '{last}'")]
    MissingCatchAll { last: String },
}

impl EngineError {
    /// Add context to the error.
    ///
    /// Only `Config` carries a free-form message; other variants are returned
    /// unchanged.
    pub fn with_context(self, ctx: impl std::fmt::Display) -> Self {
        match self {
            EngineError::Config(msg) => EngineError::Config(format!("{ctx}: {msg}")),
            other => other,
        }
    }
}
