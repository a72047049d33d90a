use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid view: {0}")]
    InvalidView(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("listener with id `{0}` is already registered")]
    DuplicateListener(String),
}
