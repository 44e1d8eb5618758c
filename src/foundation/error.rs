pub type FrostpaneResult<T> = Result<T, FrostpaneError>;

#[derive(thiserror::Error, Debug)]
pub enum FrostpaneError {
    #[error("capture error: {0}")]
    Capture(String),

    #[error("allocation error: {0}")]
    Allocation(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("blur error: {0}")]
    Blur(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FrostpaneError {
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture(msg.into())
    }

    pub fn allocation(msg: impl Into<String>) -> Self {
        Self::Allocation(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn blur(msg: impl Into<String>) -> Self {
        Self::Blur(msg.into())
    }
}
