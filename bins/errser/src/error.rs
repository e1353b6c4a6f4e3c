#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Engine(#[from] errser_engine::EngineError),

    #[error("serialize: {0}")]
    Serialize(#[from] errser_engine::SerializeError),

    #[error("input '{path}': {source}")]
    Input {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}
