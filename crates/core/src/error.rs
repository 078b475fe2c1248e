/// Errors produced by the pure number primitives
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
