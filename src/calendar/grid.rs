//! 月历网格布局
//!
//! 根据当月天数和1日的星期计算每一天所在格子的左上角坐标。
//! 需要6行时使用较小的行高。

use embedded_graphics::prelude::Point;

use crate::calendar::lunar::LunarCalendar;
use crate::common::config::LayoutConfig;
use crate::common::error::Result;

/// 网格尺寸参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridMetrics {
    pub left_margin: i32,
    pub header_height: i32,
    pub cell_width: i32,
    pub row_height: i32,
    pub compact_row_height: i32,
}

impl Default for GridMetrics {
    fn default() -> Self {
        Self {
            left_margin: LayoutConfig::GRID_LEFT_MARGIN,
            header_height: LayoutConfig::GRID_HEADER_HEIGHT,
            cell_width: LayoutConfig::GRID_CELL_WIDTH,
            row_height: LayoutConfig::GRID_ROW_HEIGHT,
            compact_row_height: LayoutConfig::GRID_ROW_HEIGHT_COMPACT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub day: u8,
    pub weekday: u8,
    pub row: u8,
    /// 格子左上角
    pub origin: Point,
}

impl GridCell {
    pub fn is_weekend(&self) -> bool {
        self.weekday == 0 || self.weekday == 6
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGrid {
    pub day_count: u8,
    pub first_weekday: u8,
    pub row_count: u8,
    pub compact: bool,
    metrics: GridMetrics,
}

impl MonthGrid {
    pub fn new(day_count: u8, first_weekday: u8, metrics: GridMetrics) -> Self {
        let first_weekday = first_weekday % 7;
        let first_row_days = 7 - first_weekday;
        let rest = day_count.saturating_sub(first_row_days);
        let row_count = 1 + rest.div_ceil(7);

        Self {
            day_count,
            first_weekday,
            row_count,
            compact: row_count > 5,
            metrics,
        }
    }

    pub fn for_month<L: LunarCalendar + ?Sized>(
        calendar: &L,
        year: u16,
        month: u8,
        metrics: GridMetrics,
    ) -> Result<Self> {
        let day_count = calendar.days_in_month(year, month)?;
        let first_weekday = calendar.first_weekday(year, month)?;
        Ok(Self::new(day_count, first_weekday, metrics))
    }

    pub fn row_height(&self) -> i32 {
        if self.compact {
            self.metrics.compact_row_height
        } else {
            self.metrics.row_height
        }
    }

    pub fn cell_width(&self) -> i32 {
        self.metrics.cell_width
    }

    /// 某一天（从1开始）的格子
    pub fn cell(&self, day: u8) -> Option<GridCell> {
        if day == 0 || day > self.day_count {
            return None;
        }
        let slot = (self.first_weekday + day - 1) as i32;
        let weekday = (slot % 7) as u8;
        let row = (slot / 7) as u8;

        Some(GridCell {
            day,
            weekday,
            row,
            origin: Point::new(
                self.metrics.left_margin + weekday as i32 * self.metrics.cell_width,
                self.metrics.header_height + row as i32 * self.row_height(),
            ),
        })
    }

    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        (1..=self.day_count).filter_map(|day| self.cell(day))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::lunar::ChineseCalendar;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn thirty_days_from_wednesday() {
        let grid = MonthGrid::new(30, 3, GridMetrics::default());
        assert_eq!(grid.row_count, 5);
        assert!(!grid.compact);

        let anchors: HashSet<Point> = grid.cells().map(|c| c.origin).collect();
        assert_eq!(anchors.len(), 30);

        let first = grid.cell(1).unwrap();
        assert_eq!(first.weekday, 3);
        assert_eq!(
            first.origin,
            Point::new(
                LayoutConfig::GRID_LEFT_MARGIN + 3 * LayoutConfig::GRID_CELL_WIDTH,
                LayoutConfig::GRID_HEADER_HEIGHT
            )
        );

        let last = grid.cell(30).unwrap();
        assert_eq!((last.weekday, last.row), (4, 4));
    }

    #[test]
    fn six_rows_use_compact_height() {
        // 2025年3月：31天，1日为周六
        let grid = MonthGrid::for_month(&ChineseCalendar::default(), 2025, 3, GridMetrics::default())
            .unwrap();
        assert_eq!((grid.day_count, grid.first_weekday), (31, 6));
        assert_eq!(grid.row_count, 6);
        assert!(grid.compact);
        assert_eq!(grid.row_height(), LayoutConfig::GRID_ROW_HEIGHT_COMPACT);

        let last = grid.cell(31).unwrap();
        assert_eq!(last.row, 5);
        assert_eq!(
            last.origin.y,
            LayoutConfig::GRID_HEADER_HEIGHT + 5 * LayoutConfig::GRID_ROW_HEIGHT_COMPACT
        );
    }

    #[test]
    fn february_starting_sunday_fits_four_rows() {
        let grid = MonthGrid::new(28, 0, GridMetrics::default());
        assert_eq!(grid.row_count, 4);
        assert!(grid.cell(0).is_none());
        assert!(grid.cell(29).is_none());
    }

    #[test]
    fn weekend_columns() {
        let grid = MonthGrid::new(31, 0, GridMetrics::default());
        let weekends: Vec<u8> = grid.cells().filter(|c| c.is_weekend()).map(|c| c.day).take(4).collect();
        assert_eq!(weekends, vec![1, 7, 8, 14]);
    }
}
