// src/common/mod.rs

/// 公共模块定义
///
/// 本模块定义了日历界面的公共类型、配置和错误处理
pub mod config;
pub mod error;
pub mod types;

pub use config::{GuiConfig, LayoutConfig};
pub use error::{AppError, Result};
pub use types::{
    BoundedName, CalendarDate, DateTime, DisplayMode, FestivalName, GuiData, LunarDate,
};
