use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("pass '{pass}' failed: {source}")]
    Pass {
        pass: String,
        #[source]
        source: anyhow::Error,
    },
}
