use thiserror::Error;

#[derive(Debug, Error)]
pub enum FoldError {
    #[error("cairo: {0}")]
    Cairo(#[from] cairo::Error),
}

pub type Result<T> = std::result::Result<T, FoldError>;
