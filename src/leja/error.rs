// Errors raised while building Leja sequences and the images around them

use std::io::{Error, ErrorKind};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LejaError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("invalid leja file: {0}")]
    InvalidFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, LejaError>;

impl From<LejaError> for Error {
    fn from(err : LejaError) -> Error {
        match err {
            LejaError::Io(io) => io,
            LejaError::InvalidArgument(_) | LejaError::InvalidFormat(_) => {
                Error::new(ErrorKind::InvalidInput, err.to_string())
            },
            LejaError::InvalidState(_) | LejaError::Image(_) => {
                Error::new(ErrorKind::InvalidData, err.to_string())
            }
        }
    }
}
