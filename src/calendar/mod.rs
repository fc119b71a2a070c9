// src/calendar/mod.rs

/// 历法相关：农历、节气、节日、节假日与月历网格
mod festival;
mod grid;
mod holiday;
mod lunar;
mod solar_term;

pub use festival::{
    Annotation, DayLabel, FixedFestival, FloatingFestival, LunarFestival, resolve_annotation,
};
pub use grid::{GridCell, GridMetrics, MonthGrid};
pub use holiday::{BUILTIN_HOLIDAY_YEAR, HolidayKind, HolidayRecord, HolidayTable};
pub use lunar::{ChineseCalendar, LunarCalendar, TermCountdown, next_solar_term};
pub use solar_term::SolarTermIndex;
