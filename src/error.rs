
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CantorError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("[{line}:{column}] {message}")]
    Parse { message: String, line: usize, column: usize },
    #[error("set {0} does not exist")]
    UnknownSet(String),
    #[error("cyclic reference to {0} is forbidden")]
    CyclicReference(String),
    #[error("backend {0} does not exist")]
    UnknownBackend(String),
    #[error("Lock poisoned: {0}")]
    Lock(String),
}

pub type Result<T> = std::result::Result<T, CantorError>;

// Helper conversions
impl From<rusqlite::Error> for CantorError {
    fn from(e: rusqlite::Error) -> Self { Self::Persistence(e.to_string()) }
}
