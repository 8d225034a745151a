use crate::model::TodoId;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while constructing or decoding a [`crate::model::Todo`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Todo ID must be a positive number (got {0})")]
    InvalidId(i64),

    #[error("Todo ID {0} is too large (the largest allowed is {max})", max = i64::MAX)]
    IdOutOfRange(TodoId),

    #[error("Todo ID {0} is used by more than one todo")]
    DuplicateId(TodoId),

    #[error("Todo description is required")]
    InvalidDescription,

    #[error("Invalid todo data: missing required field `{0}`")]
    MissingRequiredField(&'static str),
}

#[derive(Error, Debug)]
pub enum TodosError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Cannot find a todo item with id \"{0}\"")]
    NotFound(TodoId),

    #[error("{context} {}: {source}", path.display())]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_yaml::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl TodosError {
    pub fn io(context: &'static str, path: &Path, source: std::io::Error) -> Self {
        TodosError::Io {
            context,
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, TodosError>;
