use thiserror::Error;

#[derive(Error, Debug)]
pub enum TraitdexError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate implementor record: `{trait_path}` for `{type_path}` in library `{library}`")]
    DuplicateRecord {
        trait_path: String,
        type_path: String,
        library: String,
    },
    #[error("invalid index: {0}")]
    InvalidIndex(String),
    #[error("parsing error: {0}")]
    Parsing(String),
    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, TraitdexError>;
