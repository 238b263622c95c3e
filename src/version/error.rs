use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseVersionError {
    #[error("Invalid Linux version: '{0}'")]
    Invalid(String),
}
