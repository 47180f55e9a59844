use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("No formatter configured on the registry")]
    MissingFormatter,
}

pub type Result<T> = std::result::Result<T, Error>;
