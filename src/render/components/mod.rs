// src/render/components/mod.rs

/// 界面组件，每个组件都实现 `Drawable`
pub mod analog_clock_component;
pub mod calendar_component;
pub mod date_component;
pub mod lunar_component;
pub mod status_component;
pub mod time_component;

pub use analog_clock_component::AnalogClock;
pub use calendar_component::{CalendarView, DayCell, WeekBanner};
pub use date_component::{DateLine, WeekdayLabel};
pub use lunar_component::{LunarDateText, LunarYearText};
pub use status_component::{Battery, Temperature};
pub use time_component::{ClockView, DigitalTime, TermCountdownText};
