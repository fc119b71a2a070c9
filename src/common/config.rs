// src/common/config.rs
use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::primitives::Rectangle;
use log::info;
use serde::Deserialize;

use crate::calendar::HolidayTable;
use crate::common::error::{AppError, Result};
use crate::render::DisplayRotation;

pub struct LayoutConfig;

impl LayoutConfig {
    pub const DISPLAY_WIDTH: u32 = 400;
    pub const DISPLAY_HEIGHT: u32 = 300;
    /// 东八区
    pub const DEFAULT_TIMEZONE_OFFSET: i32 = 8 * 3600;
    /// 每页的行数
    pub const PAGE_HEIGHT: u32 = 64;

    // 日历界面
    pub const CALENDAR_HEADER: Point = Point::new(6, 4);
    pub const CALENDAR_LUNAR_X: i32 = 180;
    pub const WEEK_BANNER_REGION: Rectangle =
        Rectangle::new(Point::new(4, 22), Size::new(7 * 56, 18));
    pub const GRID_LEFT_MARGIN: i32 = 4;
    pub const GRID_HEADER_HEIGHT: i32 = 44;
    pub const GRID_CELL_WIDTH: i32 = 56;
    pub const GRID_ROW_HEIGHT: i32 = 50;
    pub const GRID_ROW_HEIGHT_COMPACT: i32 = 42;

    // 数字时钟界面
    pub const CLOCK_HEADER: Point = Point::new(10, 4);
    pub const CLOCK_WEEKDAY_X: i32 = 150;
    pub const BATTERY_POSITION: Point = Point::new(300, 6);
    pub const TEMPERATURE_POSITION: Point = Point::new(340, 4);
    pub const CLOCK_RULE_Y: i32 = 22;
    pub const CLOCK_DIGITS: Point = Point::new(20, 40);
    pub const CLOCK_SEGMENT_SCALE: u32 = 8;
    pub const CLOCK_LUNAR_REGION: Rectangle =
        Rectangle::new(Point::new(20, 220), Size::new(360, 60));

    // 指针时钟界面
    /// 表盘位于左上角 120×120 的方块内
    pub const ANALOG_CENTER: Point = Point::new(60, 60);
    pub const ANALOG_RADIUS: u32 = 55;
    pub const HOUR_HAND: Size = Size::new(5, 20);
    pub const MINUTE_HAND: Size = Size::new(2, 40);
}

/// 界面配置，启动时加载一次，之后只读
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GuiConfig {
    /// 时区偏移（秒）
    pub timezone_offset: i32,
    /// 分页绘制时每页的行数
    pub page_height: u32,
    pub rotation: DisplayRotation,
    /// 法定节假日调休表
    pub holidays: HolidayTable,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            timezone_offset: LayoutConfig::DEFAULT_TIMEZONE_OFFSET,
            page_height: LayoutConfig::PAGE_HEIGHT,
            rotation: DisplayRotation::Rotate0,
            holidays: HolidayTable::builtin(),
        }
    }
}

impl GuiConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GuiConfig = serde_json::from_str(json)?;
        if config.page_height == 0 {
            return Err(AppError::ConfigError("page_height must be positive"));
        }
        info!(
            "Loaded GUI config: offset={}s page_height={} rotation={:?} holidays={} ({} records)",
            config.timezone_offset,
            config.page_height,
            config.rotation,
            config.holidays.year(),
            config.holidays.len()
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::HolidayKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_json_uses_defaults() {
        let config = GuiConfig::from_json("{}").unwrap();
        assert_eq!(config.timezone_offset, 28800);
        assert_eq!(config.page_height, LayoutConfig::PAGE_HEIGHT);
        assert_eq!(config.rotation, DisplayRotation::Rotate0);
        assert_eq!(config.holidays.year(), 2025);
    }

    #[test]
    fn holiday_table_can_be_replaced() {
        let config = GuiConfig::from_json(
            r#"{
                "rotation": "Rotate90",
                "holidays": {
                    "year": 2026,
                    "days": [
                        { "month": 1, "day": 1 },
                        { "month": 1, "day": 4, "workday": true }
                    ]
                }
            }"#,
        )
        .unwrap();
        assert_eq!(config.rotation, DisplayRotation::Rotate90);
        assert_eq!(config.holidays.year(), 2026);
        assert_eq!(config.holidays.lookup(1, 4), Some(HolidayKind::Workday));
        assert_eq!(config.holidays.lookup_in_year(2025, 1, 1), None);
    }

    #[test]
    fn invalid_holiday_is_rejected() {
        let result = GuiConfig::from_json(r#"{ "holidays": { "year": 2026, "days": [ { "month": 13, "day": 1 } ] } }"#);
        assert!(matches!(result, Err(AppError::Json(_))));
    }

    #[test]
    fn zero_page_height_is_rejected() {
        assert!(matches!(
            GuiConfig::from_json(r#"{ "page_height": 0 }"#),
            Err(AppError::ConfigError(_))
        ));
    }
}
