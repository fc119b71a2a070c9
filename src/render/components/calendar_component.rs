//! 月历界面：日期抬头、星期栏、月历网格

use core::fmt::Write;

use embedded_graphics::{
    Drawable,
    prelude::{DrawTarget, Point, Primitive, Size},
    primitives::{Circle, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle},
};
use log::warn;

use crate::{
    calendar::{DayLabel, GridCell, GridMetrics, HolidayKind, HolidayTable, LunarCalendar, MonthGrid},
    common::{
        self,
        config::LayoutConfig,
        types::{CalendarDate, DateTime, LunarDate, get_weekday_name},
    },
    render::{
        FontFace, PaperColor, TextRenderer,
        components::{
            date_component::{DateLine, WeekdayLabel},
            lunar_component::{LunarDateText, LunarYearText},
        },
    },
};

/// 月历中的一天，每次绘制时重新计算
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayCell {
    pub cell: GridCell,
    pub size: Size,
    pub compact: bool,
    /// 节日、节气或农历日
    pub label: Option<DayLabel>,
    pub is_today: bool,
    pub holiday: Option<HolidayKind>,
}

impl DayCell {
    // 今天的格子有红色底圆，文字反色
    fn ink(&self, color: PaperColor) -> PaperColor {
        if self.is_today { color.inverted() } else { color }
    }
}

impl Drawable for DayCell {
    type Color = PaperColor;

    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let origin = self.cell.origin;
        let width = self.size.width as i32;
        let height = self.size.height as i32;
        let center_x = origin.x + width / 2;

        if self.is_today {
            Circle::with_center(
                Point::new(center_x, origin.y + height / 2),
                self.size.width.min(self.size.height) - 6,
            )
            .into_styled(PrimitiveStyle::with_fill(PaperColor::Red))
            .draw(target)?;
        }

        let numeral_color = self.ink(if self.cell.is_weekend() {
            PaperColor::Red
        } else {
            PaperColor::Black
        });
        let mut day: heapless::String<4> = heapless::String::new();
        let _ = write!(day, "{}", self.cell.day);
        let numeral_y = origin.y + if self.compact { 4 } else { 6 };
        TextRenderer::new(FontFace::Numeral, Point::new(center_x, numeral_y))
            .with_color(numeral_color)
            .draw_text_centered(target, &day, center_x)?;

        if let Some(label) = self.label {
            let color = self.ink(if label.is_annotation() {
                PaperColor::Red
            } else {
                PaperColor::Black
            });
            let label_y = origin.y + if self.compact { 22 } else { 26 };
            TextRenderer::new(FontFace::Label, Point::new(center_x, label_y))
                .with_color(color)
                .draw_text_centered(target, label.text(), center_x)?;
        }

        if let Some(kind) = self.holiday {
            // 今天的红圈上先垫一个白底
            if self.is_today {
                Circle::with_center(origin + Point::new(width - 9, 9), 15)
                    .into_styled(
                        PrimitiveStyleBuilder::new()
                            .fill_color(PaperColor::White)
                            .stroke_color(PaperColor::Red)
                            .stroke_width(1)
                            .build(),
                    )
                    .draw(target)?;
            }
            let color = match kind {
                HolidayKind::Rest => PaperColor::Red,
                HolidayKind::Workday => PaperColor::Black,
            };
            TextRenderer::new(FontFace::Label, origin + Point::new(width - 15, 3))
                .with_color(color)
                .draw_text(target, kind.marker())?;
        }

        Ok(())
    }
}

/// 星期栏，周末红底，工作日黑底
pub struct WeekBanner {
    pub region: Rectangle,
}

impl Drawable for WeekBanner {
    type Color = PaperColor;

    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let column_width = self.region.size.width / 7;
        let text_y = self.region.top_left.y
            + (self.region.size.height as i32 - FontFace::Label.height() as i32) / 2;

        for weekday in 0..7u8 {
            let left = self.region.top_left.x + (weekday as u32 * column_width) as i32;
            let weekend = weekday == 0 || weekday == 6;
            let background = if weekend {
                PaperColor::Red
            } else {
                PaperColor::Black
            };
            Rectangle::new(
                Point::new(left, self.region.top_left.y),
                Size::new(column_width, self.region.size.height),
            )
            .into_styled(PrimitiveStyle::with_fill(background))
            .draw(target)?;

            let center_x = left + column_width as i32 / 2;
            TextRenderer::new(FontFace::Label, Point::new(center_x, text_y))
                .with_color(PaperColor::White)
                .with_background(background)
                .draw_text_centered(target, get_weekday_name(weekday), center_x)?;
        }

        Ok(())
    }
}

/// 月历界面
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarView {
    pub today: CalendarDate,
    pub lunar: LunarDate,
    pub grid: MonthGrid,
    pub days: Vec<DayCell>,
}

impl CalendarView {
    pub fn build<L: LunarCalendar + ?Sized>(
        calendar: &L,
        now: &DateTime,
        lunar: &LunarDate,
        holidays: &HolidayTable,
    ) -> common::Result<Self> {
        let today = now.date;
        let grid = MonthGrid::for_month(calendar, today.year, today.month, GridMetrics::default())?;
        let size = Size::new(grid.cell_width() as u32, grid.row_height() as u32);

        let days = grid
            .cells()
            .map(|cell| {
                let date = CalendarDate {
                    day: cell.day,
                    weekday: cell.weekday,
                    ..today
                };
                // 每一天单独换算农历
                let label = match calendar.solar_to_lunar(&date) {
                    Ok(day_lunar) => Some(DayLabel::resolve(calendar, &date, &day_lunar)),
                    Err(e) => {
                        warn!("No lunar date for {:?}: {}", date, e);
                        None
                    }
                };
                DayCell {
                    cell,
                    size,
                    compact: grid.compact,
                    label,
                    is_today: cell.day == today.day,
                    holiday: holidays.lookup_in_year(today.year, today.month, cell.day),
                }
            })
            .collect();

        Ok(Self {
            today,
            lunar: *lunar,
            grid,
            days,
        })
    }
}

impl Drawable for CalendarView {
    type Color = PaperColor;

    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let header = LayoutConfig::CALENDAR_HEADER;
        let end = DateLine {
            date: self.today,
            position: header,
        }
        .draw(target)?;
        WeekdayLabel {
            date: self.today,
            position: end,
        }
        .draw(target)?;

        let lunar_position = Point::new(LayoutConfig::CALENDAR_LUNAR_X, header.y + 3);
        let end = LunarDateText {
            lunar: self.lunar,
            position: lunar_position,
        }
        .draw(target)?;
        LunarYearText {
            lunar: self.lunar,
            position: end + Point::new(FontFace::Label.half_width() as i32, 0),
            zodiac_color: PaperColor::Red,
        }
        .draw(target)?;

        WeekBanner {
            region: LayoutConfig::WEEK_BANNER_REGION,
        }
        .draw(target)?;

        for day in &self.days {
            day.draw(target)?;
        }

        Ok(())
    }
}
