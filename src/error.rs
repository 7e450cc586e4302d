use thiserror::Error;

use crate::core::SymbolError;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid ticker symbol: {0}")]
    InvalidSymbol(#[from] SymbolError),

    #[error("json payload error: {0}")]
    Json(String),
}
