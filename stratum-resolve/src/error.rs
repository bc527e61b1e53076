use thiserror::Error;

/// Result type for resolution operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal resolution errors. Either one aborts the run with no model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A type or property declaration is malformed or incomplete.
    #[error("invalid declaration of '{type_name}': {message}")]
    Schema { type_name: String, message: String },

    /// An inheritance chain revisits a type.
    #[error("inheritance cycle at '{type_name}': {}", chain.join(" -> "))]
    Cycle {
        type_name: String,
        chain: Vec<String>,
    },
}

impl Error {
    pub(crate) fn schema(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Schema {
            type_name: type_name.into(),
            message: message.into(),
        }
    }
}
