// src/lib.rs

//! 墨水屏日历、数字时钟和指针时钟界面
//!
//! 入口为 [`Gui`]：给定时间戳和屏幕参数，分页绘制界面并通过回调交出每一页。

pub mod calendar;
pub mod common;
pub mod gui;
pub mod render;

pub use common::{AppError, DisplayMode, GuiConfig, GuiData, Result};
pub use gui::Gui;
