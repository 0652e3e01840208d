use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Column not found: {0}")]
    ColumnNotFound(String),
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub fn column_not_found(name: impl Into<String>) -> Self {
        Error::ColumnNotFound(name.into())
    }

    pub fn schema_mismatch(msg: impl Into<String>) -> Self {
        Error::SchemaMismatch(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Error::InvalidConfig(msg.into())
    }

    /// Malformed input trees (bad ordinals, arity mismatches) as opposed to
    /// bad settings.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::ColumnNotFound(_) | Error::SchemaMismatch(_))
    }
}
