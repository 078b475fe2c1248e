#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<numfacts_core::Error> for Error {
    fn from(err: numfacts_core::Error) -> Self {
        match err {
            numfacts_core::Error::InvalidArgument(msg) => Error::InvalidArgument(msg),
        }
    }
}
