use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Log level {0} is outside of the severity table (0..=5)")]
    InvalidLogLevel(i64),
    #[error("Input/Output error")]
    IoError(#[from] std::io::Error),
}

impl<T> From<Error> for std::result::Result<T, Error> {
    fn from(error: Error) -> Self {
        Err(error)
    }
}
