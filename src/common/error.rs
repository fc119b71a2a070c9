// src/common/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate { year: i32, month: u8, day: u8 },

    #[error("Time conversion error: {0}")]
    Time(#[from] jiff::Error),

    #[error("Lunar calendar out of range: {0}")]
    LunarOutOfRange(i32),

    #[error("Unknown display mode: {0}")]
    UnknownMode(u8),

    #[error("Configuration error: {0}")]
    ConfigError(&'static str),

    #[error("Configuration parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Rendering failed")]
    RenderingFailed,
}

pub type Result<T> = core::result::Result<T, AppError>;
