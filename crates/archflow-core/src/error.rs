pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid definition JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid definition JSON5: {message}")]
    Json5 { message: String },

    #[error("Definition error ({definition_id}): {message}")]
    Definition {
        definition_id: String,
        message: String,
    },

    #[error("Unknown architecture: {id}")]
    UnknownArchitecture { id: String },
}
